//! `kin add`: get-or-create entries by title.

use std::io::Write;
use std::path::Path;

use clap::Args;
use serde::Serialize;

use crate::output::{OutputMode, render};
use crate::project::Project;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Titles to add. Existing titles are left untouched.
    #[arg(required = true)]
    pub titles: Vec<String>,
}

#[derive(Debug, Serialize)]
struct AddOutput {
    ok: bool,
    created: Vec<String>,
    existing: Vec<String>,
}

pub fn run_add(args: &AddArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    super::require_titles(output, args.titles.iter().map(String::as_str))?;

    let mut project = Project::discover(project_root, output)?;
    let _lock = project.lock_for_edit(output)?;
    let mut store = project.load(output)?;

    let mut result = AddOutput {
        ok: true,
        created: Vec::new(),
        existing: Vec::new(),
    };
    for title in &args.titles {
        if store.contains(title) {
            result.existing.push(title.clone());
        } else {
            store.get_or_create(title);
            result.created.push(title.clone());
        }
    }

    if !result.created.is_empty() {
        project.save(&store, output)?;
    }

    render(output, &result, |r, w| {
        for title in &r.created {
            writeln!(w, "✓ added {title}")?;
        }
        for title in &r.existing {
            writeln!(w, "· {title} already exists")?;
        }
        Ok(())
    })
}
