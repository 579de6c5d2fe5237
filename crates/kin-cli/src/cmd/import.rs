//! `kin import`: replace the store with an exported snapshot.
//!
//! The import is all-or-nothing: the file must parse as an entries array.
//! After saving, the store is read back and compared order-insensitively with
//! what was imported. Links recorded on only one side and ancestor cycles
//! are reported but kept as imported.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Args;
use serde::Serialize;
use tracing::{info, warn};

use kin_core::equality::shallow_sets_equal;
use kin_core::error::ErrorCode;
use kin_core::graph::cycles::find_all_cycles;
use kin_core::model::EntryStore;
use kin_core::persist::load;
use kin_core::persist::snapshot::parse;

use crate::output::{CliError, OutputMode, fail, render};
use crate::project::Project;

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON file produced by `kin export`.
    pub file: PathBuf,
}

#[derive(Debug, Serialize)]
struct ImportOutput {
    ok: bool,
    entries: usize,
    dropped: usize,
    asymmetric_edges: usize,
    cycles: usize,
    verified: bool,
}

pub fn run_import(args: &ImportArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let entries = parse(&content)
        .map_err(|err| fail(output, &CliError::coded(err.code(), err.to_string())))?;
    let given = entries.len();

    let mut project = Project::discover(project_root, output)?;
    let _lock = project.lock_for_edit(output)?;

    let mut store = EntryStore::new();
    store.replace_all(entries);

    let asymmetric = store.asymmetric_edges();
    for (parent, child) in &asymmetric {
        warn!(parent = %parent, child = %child, "imported link is only recorded on one side");
    }
    let cycles = find_all_cycles(&store);
    for cycle in &cycles {
        warn!(%cycle, "imported entries contain an ancestor cycle");
    }

    project.save(&store, output)?;

    let reloaded = load(project.kv())
        .map_err(|err| fail(output, &CliError::coded(err.code(), err.to_string())))?;
    let verified = shallow_sets_equal(store.entries(), reloaded.entries());
    if !verified {
        return Err(fail(
            output,
            &CliError::coded(
                ErrorCode::StoreWriteFailed,
                "stored entries differ from the imported snapshot",
            ),
        ));
    }
    info!(entries = store.len(), "imported snapshot");

    let result = ImportOutput {
        ok: true,
        entries: store.len(),
        dropped: given - store.len(),
        asymmetric_edges: asymmetric.len(),
        cycles: cycles.len(),
        verified,
    };
    render(output, &result, |r, w| {
        writeln!(w, "✓ imported {} entries", r.entries)?;
        if r.dropped > 0 {
            writeln!(w, "  dropped {} duplicate titles", r.dropped)?;
        }
        if r.asymmetric_edges > 0 {
            writeln!(
                w,
                "  warning: {} links are only recorded on one side",
                r.asymmetric_edges
            )?;
        }
        if r.cycles > 0 {
            writeln!(w, "  warning: {} ancestor cycles", r.cycles)?;
        }
        Ok(())
    })
}
