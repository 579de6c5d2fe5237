use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Args;
use serde::Serialize;

use kin_core::persist::snapshot::to_json;

use crate::output::{CliError, OutputMode, fail, render};
use crate::project::Project;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Write the snapshot to this file instead of stdout.
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ExportOutput {
    ok: bool,
    path: String,
    entries: usize,
}

/// Dump the whole store as the stored JSON entries array.
///
/// Without `--output` the array itself is the output, whatever the mode.
pub fn run_export(args: &ExportArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let project = Project::discover(project_root, output)?;
    let store = project.load(output)?;
    let json = to_json(&store)
        .map_err(|err| fail(output, &CliError::coded(err.code(), err.to_string())))?;

    let Some(path) = &args.output else {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        writeln!(out, "{json}")?;
        return Ok(());
    };

    std::fs::write(path, format!("{json}\n"))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    let result = ExportOutput {
        ok: true,
        path: path.display().to_string(),
        entries: store.len(),
    };
    render(output, &result, |r, w| {
        writeln!(w, "✓ exported {} entries to {}", r.entries, r.path)
    })
}
