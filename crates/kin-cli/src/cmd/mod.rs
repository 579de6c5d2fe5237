pub mod add;
pub mod completions;
pub mod detach;
pub mod export;
pub mod give;
pub mod import;
pub mod init;
pub mod list;
pub mod show;

use crate::output::{CliError, OutputMode, fail};

/// Refuse empty or whitespace-only titles before anything is loaded.
pub fn require_titles<'a>(
    output: OutputMode,
    titles: impl IntoIterator<Item = &'a str>,
) -> anyhow::Result<()> {
    match titles.into_iter().find(|title| title.trim().is_empty()) {
        Some(blank) => Err(fail(
            output,
            &CliError::new(format!("entry title must not be blank: {blank:?}")),
        )),
        None => Ok(()),
    }
}
