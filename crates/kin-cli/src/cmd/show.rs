//! `kin show`: the relations around one focus entry.
//!
//! Pretty output draws the five generation columns side by side, oldest on
//! the left, followed by the connecting links. Text output prints one line per
//! relation code. JSON output carries both the relation lists and the layout.

use std::io::{self, Write};
use std::path::Path;

use clap::Args;
use serde::Serialize;
use tracing::info;

use kin_core::relations::{Cell, Layout, RelationCode, RelationSet, Scope};

use crate::output::{CliError, OutputMode, fail, pretty_section, render, render_mode};
use crate::project::Project;

const MIN_COLUMN_WIDTH: usize = 8;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Focus entry. Created if it does not exist yet.
    pub title: String,

    /// Report only these titles (comma-separated). Traversal still passes
    /// through entries outside the list.
    #[arg(long, value_delimiter = ',', value_name = "TITLES")]
    pub only: Option<Vec<String>>,

    /// Print a single relation list (d, u, dd, uu, du, ud, ddu, dud, udd,
    /// duu, uud, udu).
    #[arg(long, value_name = "CODE")]
    pub code: Option<String>,
}

#[derive(Debug, Serialize)]
struct ShowOutput {
    focus: String,
    created: bool,
    relations: RelationSet,
    layout: Layout,
}

#[derive(Debug, Serialize)]
struct CodeOutput<'a> {
    focus: &'a str,
    code: RelationCode,
    label: &'static str,
    titles: &'a [String],
}

pub fn run_show(args: &ShowArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    super::require_titles(output, [args.title.as_str()])?;
    let code = args
        .code
        .as_deref()
        .map(str::parse::<RelationCode>)
        .transpose()
        .map_err(|err| fail(output, &CliError::coded(err.code(), err.to_string())))?;

    let scope = args
        .only
        .as_ref()
        .map_or(Scope::All, |titles| Scope::only(titles.iter().map(|t| t.trim())));

    let mut project = Project::discover(project_root, output)?;
    let _lock = project.lock_for_edit(output)?;
    let mut store = project.load(output)?;

    let created = !store.contains(&args.title);
    let relations = store.relations(&args.title, &scope);
    if created {
        info!(title = %args.title, "created focus entry");
        project.save(&store, output)?;
    }

    if let Some(code) = code {
        let result = CodeOutput {
            focus: &relations.focus,
            code,
            label: code.label(),
            titles: relations.get(code),
        };
        return render(output, &result, |r, w| {
            for title in r.titles {
                writeln!(w, "{title}")?;
            }
            Ok(())
        });
    }

    let layout = Layout::from_relations(&relations);
    let result = ShowOutput {
        focus: relations.focus.clone(),
        created,
        relations,
        layout,
    };
    render_mode(
        output,
        &result,
        |r, w| write_codes(&r.relations, w),
        |r, w| {
            pretty_section(w, &format!("Relations of {}", r.focus))?;
            write_columns(&r.layout, w)?;
            write_links(&r.layout, w)
        },
    )
}

fn write_codes(set: &RelationSet, w: &mut dyn Write) -> io::Result<()> {
    for (code, titles) in set.iter() {
        writeln!(w, "{code}\t{}\t{}", code.label(), titles.join(","))?;
    }
    Ok(())
}

fn cell_text(cell: &Cell) -> String {
    match cell.code {
        Some(code) => format!("{} ({code})", cell.title),
        None => format!("[{}]", cell.title),
    }
}

fn write_columns(layout: &Layout, w: &mut dyn Write) -> io::Result<()> {
    let columns: Vec<(&'static str, Vec<String>)> = layout
        .columns
        .iter()
        .map(|slot| (slot.column.heading(), slot.cells.iter().map(cell_text).collect()))
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .map(|(heading, cells)| {
            cells
                .iter()
                .map(|c| c.chars().count())
                .chain([heading.len(), MIN_COLUMN_WIDTH])
                .max()
                .unwrap_or(MIN_COLUMN_WIDTH)
        })
        .collect();

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|((heading, _), width)| format!("{heading:<width$}"))
        .collect();
    writeln!(w, "{}", header.join("  ").trim_end())?;

    for row in 0..layout.depth() {
        let line: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|((_, cells), width)| {
                let text = cells.get(row).map_or("", String::as_str);
                format!("{text:<width$}")
            })
            .collect();
        writeln!(w, "{}", line.join("  ").trim_end())?;
    }
    Ok(())
}

fn write_links(layout: &Layout, w: &mut dyn Write) -> io::Result<()> {
    // Links whose ends have no cell are skipped.
    let drawable: Vec<_> = layout
        .links
        .iter()
        .filter(|link| {
            layout.position_of(&link.from).is_some() && layout.position_of(&link.to).is_some()
        })
        .collect();
    if drawable.is_empty() {
        return Ok(());
    }

    writeln!(w)?;
    pretty_section(w, "Links")?;
    for link in drawable {
        writeln!(w, "{} ─ {}  [{}]", link.from, link.to, link.code)?;
    }
    Ok(())
}
