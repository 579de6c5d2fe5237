use std::io::Write;
use std::path::Path;

use clap::Args;

use kin_core::model::Entry;

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};
use crate::project::Project;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show entries with no parents and no children.
    #[arg(long)]
    pub isolated: bool,
}

/// List every entry in creation order.
pub fn run_list(args: &ListArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let project = Project::discover(project_root, output)?;
    let store = project.load(output)?;

    let entries: Vec<&Entry> = store
        .iter()
        .filter(|entry| !args.isolated || entry.is_isolated())
        .collect();

    render_mode(
        output,
        &entries,
        |entries, w| {
            writeln!(w, "title\tparents\tchildren")?;
            for entry in entries {
                writeln!(
                    w,
                    "{}\t{}\t{}",
                    entry.title(),
                    entry.parent_titles().join(","),
                    entry.children_titles().join(",")
                )?;
            }
            Ok(())
        },
        |entries, w| {
            if entries.is_empty() {
                return writeln!(w, "No entries yet. Add one with `kin add <title>`.");
            }
            pretty_section(w, &format!("Entries ({})", entries.len()))?;
            for entry in entries {
                writeln!(w, "{}", entry.title())?;
                if !entry.parent_titles().is_empty() {
                    pretty_kv(w, "  parents", &entry.parent_titles().join(", "))?;
                }
                if !entry.children_titles().is_empty() {
                    pretty_kv(w, "  children", &entry.children_titles().join(", "))?;
                }
            }
            Ok(())
        },
    )
}
