use std::io::Write;
use std::path::Path;

use clap::Args;
use serde::Serialize;

use kin_core::graph::detach;

use crate::output::{OutputMode, render};
use crate::project::Project;

#[derive(Args, Debug)]
pub struct DetachArgs {
    /// One end of the link.
    pub a: String,

    /// The other end. Direction does not matter.
    pub b: String,
}

#[derive(Debug, Serialize)]
struct DetachOutput {
    ok: bool,
    a: String,
    b: String,
    removed: bool,
}

/// Remove whatever parent/child link exists between two entries. Entries
/// themselves are never created or removed.
pub fn run_detach(args: &DetachArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let mut project = Project::discover(project_root, output)?;
    let _lock = project.lock_for_edit(output)?;
    let mut store = project.load(output)?;

    let removed = detach(&mut store, &args.a, &args.b);
    if removed {
        project.save(&store, output)?;
    }

    let result = DetachOutput {
        ok: true,
        a: args.a.clone(),
        b: args.b.clone(),
        removed,
    };
    render(output, &result, |r, w| {
        if r.removed {
            writeln!(w, "✓ detached {} and {}", r.a, r.b)
        } else {
            writeln!(w, "· no link between {} and {}", r.a, r.b)
        }
    })
}
