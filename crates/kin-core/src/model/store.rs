//! The owned collection of entries.
//!
//! [`EntryStore`] replaces a process-wide entries list: callers construct one
//! per session and pass it by reference to the editor and the classifier.
//!
//! # Invariants
//!
//! - No two entries share a title; [`EntryStore::get_or_create`] is
//!   idempotent.
//! - Entries keep creation order. There is no deletion.
//!
//! Edge symmetry (a child listed on one side implies the parent listed on the
//! other) is maintained by [`crate::graph::editor`]; [`EntryStore::asymmetric_edges`]
//! reports violations in snapshots that were edited by hand.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::entry::Entry;

/// Title-keyed entry collection with creation-order iteration.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: Vec<Entry>,
    /// title → position in `entries`.
    index: HashMap<String, usize>,
}

impl EntryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a snapshot. See [`EntryStore::replace_all`].
    #[must_use]
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        let mut store = Self::new();
        store.replace_all(entries);
        store
    }

    /// Return the entry titled `title`, creating an empty one if absent.
    ///
    /// Never fails. Creation appends to the end of the store.
    pub fn get_or_create(&mut self, title: &str) -> &Entry {
        let pos = self.position_or_insert(title);
        &self.entries[pos]
    }

    /// Look up an entry without creating it.
    #[must_use]
    pub fn get(&self, title: &str) -> Option<&Entry> {
        self.index.get(title).map(|&pos| &self.entries[pos])
    }

    #[must_use]
    pub fn contains(&self, title: &str) -> bool {
        self.index.contains_key(title)
    }

    /// Replace the whole collection, as done when loading a snapshot.
    ///
    /// No merge with the previous contents happens. A repeated title keeps its
    /// first occurrence; later duplicates are dropped with a warning so the
    /// uniqueness invariant survives malformed input.
    pub fn replace_all(&mut self, entries: Vec<Entry>) {
        self.entries.clear();
        self.index.clear();
        for mut entry in entries {
            if self.index.contains_key(entry.title()) {
                warn!(title = entry.title(), "dropping duplicate entry from snapshot");
                continue;
            }
            entry.dedup_relations();
            self.index.insert(entry.title().to_string(), self.entries.len());
            self.entries.push(entry);
        }
        debug!(count = self.entries.len(), "entry store replaced");
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in creation order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// All titles in creation order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Entry::title)
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    /// Every `(parent, child)` edge recorded on only one side, in store order.
    ///
    /// Edges pointing at titles with no entry are included. A store mutated
    /// only through the editor always returns an empty list.
    #[must_use]
    pub fn asymmetric_edges(&self) -> Vec<(String, String)> {
        let mut found: Vec<(String, String)> = Vec::new();
        let mut record = |parent: &str, child: &str| {
            if !found.iter().any(|(p, c)| p == parent && c == child) {
                found.push((parent.to_string(), child.to_string()));
            }
        };

        for entry in &self.entries {
            for child in entry.children_titles() {
                if !self.get(child).is_some_and(|c| c.has_parent(entry.title())) {
                    record(entry.title(), child);
                }
            }
            for parent in entry.parent_titles() {
                if !self.get(parent).is_some_and(|p| p.has_child(entry.title())) {
                    record(parent, entry.title());
                }
            }
        }
        found
    }

    pub(crate) fn position(&self, title: &str) -> Option<usize> {
        self.index.get(title).copied()
    }

    pub(crate) fn position_or_insert(&mut self, title: &str) -> usize {
        if let Some(pos) = self.position(title) {
            return pos;
        }
        let pos = self.entries.len();
        self.entries.push(Entry::new(title));
        self.index.insert(title.to_string(), pos);
        debug!(title, "created entry");
        pos
    }

    /// Mutable access to two distinct entries at once.
    ///
    /// # Panics
    ///
    /// Panics if `a == b`; callers reject self-relations before resolving.
    pub(crate) fn pair_mut(&mut self, a: usize, b: usize) -> (&mut Entry, &mut Entry) {
        assert_ne!(a, b, "pair_mut requires two distinct entries");
        if a < b {
            let (left, right) = self.entries.split_at_mut(b);
            (&mut left[a], &mut right[0])
        } else {
            let (left, right) = self.entries.split_at_mut(a);
            (&mut right[0], &mut left[b])
        }
    }
}
