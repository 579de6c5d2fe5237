//! `kin give`: link two entries as parent and child.
//!
//! - `kin give <title> --child <other>`: `<other>` becomes a child of `<title>`
//! - `kin give <title> --parent <other>`: `<other>` becomes a parent of `<title>`
//!
//! A link in the opposite direction between the same two entries is replaced.

use std::io::Write;
use std::path::Path;

use clap::Args;
use serde::Serialize;
use tracing::info;

use kin_core::graph::{CyclePolicy, EdgeChange, EditOutcome};

use crate::output::{CliError, OutputMode, fail, render};
use crate::project::Project;

#[derive(Args, Debug)]
#[command(group(clap::ArgGroup::new("relation").required(true).args(["child", "parent"])))]
pub struct GiveArgs {
    /// Entry the edit is anchored on.
    pub title: String,

    /// Make <OTHER> a child of <TITLE>.
    #[arg(long, value_name = "OTHER")]
    pub child: Option<String>,

    /// Make <OTHER> a parent of <TITLE>.
    #[arg(long, value_name = "OTHER")]
    pub parent: Option<String>,

    /// Refuse edits that make an entry its own ancestor, regardless of config.
    #[arg(long)]
    pub reject_cycles: bool,
}

#[derive(Debug, Serialize)]
struct GiveOutput {
    ok: bool,
    #[serde(flatten)]
    outcome: EditOutcome,
}

pub fn run_give(args: &GiveArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let other = args.child.as_deref().or(args.parent.as_deref());
    super::require_titles(output, std::iter::once(args.title.as_str()).chain(other))?;

    let mut project = Project::discover(project_root, output)?;
    let policy = if args.reject_cycles {
        CyclePolicy::Reject
    } else {
        project.config.graph.cycles
    };

    let _lock = project.lock_for_edit(output)?;
    let mut store = project.load(output)?;

    let edit = store.give(&args.title).with_policy(policy);
    let result = match (&args.child, &args.parent) {
        (Some(child), _) => edit.as_child(child),
        (None, Some(parent)) => edit.as_parent(parent),
        (None, None) => return Err(fail(output, &CliError::new("must provide --child or --parent"))),
    };
    let outcome = result
        .map_err(|err| fail(output, &CliError::coded(err.code(), err.to_string())))?;

    if outcome.change != EdgeChange::Unchanged {
        project.save(&store, output)?;
    }
    info!(
        parent = %outcome.parent,
        child = %outcome.child,
        change = ?outcome.change,
        "linked entries"
    );

    if let Some(cycle) = outcome.cycle.as_ref().filter(|_| !output.is_json()) {
        eprintln!("warning: {cycle}");
    }

    let result = GiveOutput { ok: true, outcome };
    render(output, &result, |r, w| {
        let o = &r.outcome;
        match o.change {
            EdgeChange::Added => writeln!(w, "✓ {} is now a parent of {}", o.parent, o.child),
            EdgeChange::Flipped => writeln!(
                w,
                "✓ {} is now a parent of {} (replaced the opposite link)",
                o.parent, o.child
            ),
            EdgeChange::Unchanged => {
                writeln!(w, "· {} is already a parent of {}", o.parent, o.child)
            }
        }
    })
}
