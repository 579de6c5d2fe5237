//! Parent/child edge mutation between two entries.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut store = EntryStore::new();
//! store.give("Alice").as_child("Bob")?;   // Alice → Bob
//! store.give("Alice").as_parent("Carol")?; // Carol → Alice
//! ```
//!
//! # Invariants
//!
//! Every edit keeps both sides of an edge in sync (B is a child of A exactly
//! when A is a parent of B) and never lets two entries be each other's parent
//! and child at once. Establishing a direction first removes the opposite one
//! on both sides, so the last edit between two entries decides the direction.
//! Repeating an edit is a no-op, not an error.
//!
//! Self-relations are rejected. Cycles through three or more entries are
//! handled according to [`CyclePolicy`].

#![allow(clippy::module_name_repetitions)]

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::cycles::{CycleWarning, detect_cycle_on_add};
use crate::error::ErrorCode;
use crate::model::EntryStore;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// What the editor does when a new edge would make an entry its own ancestor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePolicy {
    /// Apply the edit and report the cycle in [`EditOutcome::cycle`].
    #[default]
    Warn,
    /// Refuse the edit with [`EditError::CycleDetected`].
    Reject,
}

/// How an edit changed the edge between two entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeChange {
    /// No edge existed between the two entries.
    Added,
    /// The opposite edge existed and was replaced.
    Flipped,
    /// The requested edge already existed.
    Unchanged,
}

/// Result of a successful edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditOutcome {
    pub parent: String,
    pub child: String,
    pub change: EdgeChange,
    /// Set when the edit closed an ancestor cycle under [`CyclePolicy::Warn`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle: Option<CycleWarning>,
}

/// Errors from edge edits.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("'{0}' cannot be its own parent or child")]
    SelfRelation(String),

    #[error("{0}")]
    CycleDetected(CycleWarning),
}

impl EditError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::SelfRelation(_) => ErrorCode::SelfRelation,
            Self::CycleDetected(_) => ErrorCode::CycleDetected,
        }
    }

    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }
}

// ---------------------------------------------------------------------------
// give(...)
// ---------------------------------------------------------------------------

/// Pending edit anchored on one entry; finish it with
/// [`Give::as_child`] or [`Give::as_parent`].
#[must_use = "call as_child or as_parent to apply the edit"]
pub struct Give<'a> {
    store: &'a mut EntryStore,
    title: String,
    policy: CyclePolicy,
}

impl EntryStore {
    /// Start an edit on `title` using [`CyclePolicy::Warn`].
    pub fn give(&mut self, title: &str) -> Give<'_> {
        Give {
            store: self,
            title: title.to_string(),
            policy: CyclePolicy::default(),
        }
    }
}

impl Give<'_> {
    pub fn with_policy(mut self, policy: CyclePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Make `child` a child of the anchored entry.
    ///
    /// Both entries are created if absent. If `child` was a parent of the
    /// anchored entry, that edge is removed first.
    ///
    /// # Errors
    ///
    /// [`EditError::SelfRelation`] when `child` is the anchored entry, and
    /// [`EditError::CycleDetected`] under [`CyclePolicy::Reject`]. The store
    /// is untouched on error.
    pub fn as_child(self, child: &str) -> Result<EditOutcome, EditError> {
        let Self {
            store,
            title,
            policy,
        } = self;
        link(store, &title, child, Side::OtherIsChild, policy)
    }

    /// Make `parent` a parent of the anchored entry. Mirror of
    /// [`Give::as_child`].
    ///
    /// # Errors
    ///
    /// Same as [`Give::as_child`].
    pub fn as_parent(self, parent: &str) -> Result<EditOutcome, EditError> {
        let Self {
            store,
            title,
            policy,
        } = self;
        link(store, &title, parent, Side::OtherIsParent, policy)
    }
}

#[derive(Clone, Copy)]
enum Side {
    OtherIsChild,
    OtherIsParent,
}

fn link(
    store: &mut EntryStore,
    title: &str,
    other: &str,
    side: Side,
    policy: CyclePolicy,
) -> Result<EditOutcome, EditError> {
    if title == other {
        return Err(EditError::SelfRelation(title.to_string()));
    }

    let (parent, child) = match side {
        Side::OtherIsChild => (title, other),
        Side::OtherIsParent => (other, title),
    };

    let cycle = detect_cycle_on_add(store, parent, child);
    if let Some(warning) = cycle.clone() {
        match policy {
            CyclePolicy::Reject => return Err(EditError::CycleDetected(warning)),
            CyclePolicy::Warn => warn!(%warning, "edit closes an ancestor cycle"),
        }
    }

    // Resolve the anchored entry first, then the other one.
    let title_pos = store.position_or_insert(title);
    let other_pos = store.position_or_insert(other);
    let (parent_pos, child_pos) = match side {
        Side::OtherIsChild => (title_pos, other_pos),
        Side::OtherIsParent => (other_pos, title_pos),
    };

    let (parent_entry, child_entry) = store.pair_mut(parent_pos, child_pos);
    let flipped_a = parent_entry.remove_parent(child);
    let added_a = parent_entry.add_child(child);
    let flipped_b = child_entry.remove_child(parent);
    let added_b = child_entry.add_parent(parent);

    let change = if flipped_a || flipped_b {
        EdgeChange::Flipped
    } else if added_a || added_b {
        EdgeChange::Added
    } else {
        EdgeChange::Unchanged
    };
    debug!(parent, child, ?change, "edge set");

    Ok(EditOutcome {
        parent: parent.to_string(),
        child: child.to_string(),
        change,
        cycle,
    })
}

/// Remove any parent/child edge between `a` and `b`, in either direction.
///
/// Entries are never created or deleted. Returns `true` if an edge was
/// removed.
pub fn detach(store: &mut EntryStore, a: &str, b: &str) -> bool {
    let (Some(a_pos), Some(b_pos)) = (store.position(a), store.position(b)) else {
        return false;
    };
    if a_pos == b_pos {
        return false;
    }

    let (a_entry, b_entry) = store.pair_mut(a_pos, b_pos);
    let removed = [
        a_entry.remove_child(b),
        a_entry.remove_parent(b),
        b_entry.remove_child(a),
        b_entry.remove_parent(a),
    ];
    let any = removed.contains(&true);
    if any {
        debug!(a, b, "edge detached");
    }
    any
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
