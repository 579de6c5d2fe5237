//! Ancestor-cycle detection over parent → child edges.
//!
//! # Overview
//!
//! Nothing in the entry model stops an entry from becoming its own ancestor
//! (A parent of B, B parent of C, C parent of A). The classifier tolerates
//! such graphs because every traversal stops after three hops, but the result
//! reads oddly. This module detects the cycle a new edge would close so the
//! editor can warn or reject, depending on [`CyclePolicy`].
//!
//! # Design
//!
//! - **DFS-based**: depth-first search from the new child along children
//!   edges, looking for a path back to the new parent.
//! - **Flip-aware**: when the new edge replaces the opposite one (the child
//!   used to be the parent), the replaced edge is ignored, since the editor
//!   removes it before adding the new one.
//! - **Iterative**: both walks keep an explicit stack, so chain depth is
//!   bounded by memory rather than the thread stack.
//! - **Cheap common case**: an edge whose parent has no other ancestor, or
//!   whose child has no other descendant, cannot close a loop and skips the
//!   walk entirely. Otherwise each detection visits each entry and edge at
//!   most once.
//!
//! [`CyclePolicy`]: super::editor::CyclePolicy

#![allow(
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::doc_markdown,
)]

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::model::EntryStore;

// ---------------------------------------------------------------------------
// CycleWarning
// ---------------------------------------------------------------------------

/// A cycle closed (or about to be closed) by a parent → child edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleWarning {
    /// The ordered titles forming the loop, starting and ending at `parent`.
    ///
    /// Adding edge A→B when B→C→A already exists gives `["A", "B", "C", "A"]`.
    pub cycle_path: Vec<String>,

    /// Parent side of the closing edge.
    pub parent: String,

    /// Child side of the closing edge.
    pub child: String,
}

impl CycleWarning {
    /// Number of distinct entries in the cycle.
    pub fn cycle_len(&self) -> usize {
        self.cycle_path.len().saturating_sub(1)
    }

    pub fn is_self_loop(&self) -> bool {
        self.parent == self.child
    }
}

impl fmt::Display for CycleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_self_loop() {
            write!(f, "cycle detected: '{}' would be its own parent", self.parent)
        } else {
            write!(
                f,
                "cycle detected ({} entries): {}",
                self.cycle_len(),
                self.cycle_path.join(" → ")
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Core detection
// ---------------------------------------------------------------------------

/// Detect whether adding the edge `parent → child` would make `parent` its
/// own descendant.
///
/// An existing `child → parent` edge is ignored because establishing the new
/// direction removes it first.
///
/// Returns `Some(CycleWarning)` if a cycle would be created.
pub fn detect_cycle_on_add(store: &EntryStore, parent: &str, child: &str) -> Option<CycleWarning> {
    if parent == child {
        return Some(CycleWarning {
            cycle_path: vec![parent.to_string(), parent.to_string()],
            parent: parent.to_string(),
            child: child.to_string(),
        });
    }

    // A loop needs `parent` to have an ancestor and `child` a descendant,
    // not counting the edge being flipped.
    let has_other = |titles: &[String], flipped: &str| titles.iter().any(|t| t != flipped);
    if !has_other(parents_of(store, parent), child)
        || !has_other(children_of(store, child), parent)
    {
        return None;
    }

    let came_from = find_path(store, child, parent, (child, parent))?;
    let mut cycle_path = vec![parent.to_string()];
    cycle_path.extend(reconstruct_path(&came_from, child, parent));
    Some(CycleWarning {
        cycle_path,
        parent: parent.to_string(),
        child: child.to_string(),
    })
}

/// Find every ancestor cycle currently in the store.
///
/// Each cycle is reported once, through the back edge that closes it during
/// a depth-first walk in store order.
pub fn find_all_cycles(store: &EntryStore) -> Vec<CycleWarning> {
    let mut warnings = Vec::new();
    let mut color: HashMap<&str, Color> = HashMap::new();
    let mut came_from: HashMap<&str, &str> = HashMap::new();

    for root in store.titles() {
        if color.contains_key(root) {
            continue;
        }
        color.insert(root, Color::Gray);
        // Each frame is an entry on the current path and the index of the
        // next child to visit.
        let mut stack: Vec<(&str, usize)> = vec![(root, 0)];

        while let Some(frame) = stack.last_mut() {
            let (node, next_index) = *frame;
            let Some(next) = children_of(store, node).get(next_index) else {
                color.insert(node, Color::Black);
                stack.pop();
                continue;
            };
            frame.1 += 1;

            match color.get(next.as_str()) {
                None => {
                    color.insert(next.as_str(), Color::Gray);
                    came_from.insert(next.as_str(), node);
                    stack.push((next.as_str(), 0));
                }
                Some(Color::Gray) => {
                    // Back edge node → next: next is an ancestor on the path.
                    let mut cycle_path = reconstruct_path(&came_from, next, node);
                    cycle_path.push(next.clone());
                    warnings.push(CycleWarning {
                        cycle_path,
                        parent: node.to_string(),
                        child: next.clone(),
                    });
                }
                Some(Color::Black) => {}
            }
        }
    }

    warnings
}

// ---------------------------------------------------------------------------
// DFS internals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Gray,
    Black,
}

fn children_of<'a>(store: &'a EntryStore, title: &str) -> &'a [String] {
    store
        .get(title)
        .map(|entry| entry.children_titles())
        .unwrap_or_default()
}

fn parents_of<'a>(store: &'a EntryStore, title: &str) -> &'a [String] {
    store
        .get(title)
        .map(|entry| entry.parent_titles())
        .unwrap_or_default()
}

/// Depth-first search from `start` along children edges, never following
/// `skip`. Returns the predecessor map once `target` is reached.
fn find_path<'a>(
    store: &'a EntryStore,
    start: &'a str,
    target: &str,
    skip: (&str, &str),
) -> Option<HashMap<&'a str, &'a str>> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut came_from: HashMap<&str, &str> = HashMap::new();
    let mut stack: Vec<(&str, Option<&str>)> = vec![(start, None)];

    while let Some((current, from)) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        if let Some(from) = from {
            came_from.insert(current, from);
        }
        if current == target {
            return Some(came_from);
        }

        // Reversed so children are explored in stored order.
        for next in children_of(store, current).iter().rev() {
            if (current, next.as_str()) != skip && !visited.contains(next.as_str()) {
                stack.push((next.as_str(), Some(current)));
            }
        }
    }

    None
}

/// Titles from `start` to `end` (inclusive) following `came_from` backwards.
fn reconstruct_path(came_from: &HashMap<&str, &str>, start: &str, end: &str) -> Vec<String> {
    let mut chain = vec![end.to_string()];
    let mut current = end;
    while current != start {
        match came_from.get(current) {
            Some(prev) => {
                chain.push((*prev).to_string());
                current = prev;
            }
            None => break,
        }
    }
    chain.reverse();
    chain
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
