//! A single titled node in the entry graph.

use serde::{Deserialize, Serialize};

/// A user-created, titled node with ordered parent and child title lists.
///
/// The title is the identity key. Both relation lists behave as ordered sets:
/// insertion order is kept for display and a title never appears twice.
///
/// Mutators are crate-private so that edge symmetry between two entries is
/// only ever changed through [`crate::graph::editor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    title: String,
    #[serde(default)]
    parent_titles: Vec<String>,
    #[serde(default)]
    children_titles: Vec<String>,
}

impl Entry {
    /// A fresh entry with no relations.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            parent_titles: Vec::new(),
            children_titles: Vec::new(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn parent_titles(&self) -> &[String] {
        &self.parent_titles
    }

    #[must_use]
    pub fn children_titles(&self) -> &[String] {
        &self.children_titles
    }

    #[must_use]
    pub fn has_parent(&self, title: &str) -> bool {
        self.parent_titles.iter().any(|t| t == title)
    }

    #[must_use]
    pub fn has_child(&self, title: &str) -> bool {
        self.children_titles.iter().any(|t| t == title)
    }

    /// `true` when the entry has neither parents nor children.
    #[must_use]
    pub fn is_isolated(&self) -> bool {
        self.parent_titles.is_empty() && self.children_titles.is_empty()
    }

    pub(crate) fn add_parent(&mut self, title: &str) -> bool {
        push_unique(&mut self.parent_titles, title)
    }

    pub(crate) fn remove_parent(&mut self, title: &str) -> bool {
        remove_title(&mut self.parent_titles, title)
    }

    pub(crate) fn add_child(&mut self, title: &str) -> bool {
        push_unique(&mut self.children_titles, title)
    }

    pub(crate) fn remove_child(&mut self, title: &str) -> bool {
        remove_title(&mut self.children_titles, title)
    }

    /// Collapse duplicate titles in both lists, keeping first occurrences.
    ///
    /// Only needed for snapshots produced outside this crate.
    pub(crate) fn dedup_relations(&mut self) {
        dedup_in_order(&mut self.parent_titles);
        dedup_in_order(&mut self.children_titles);
    }
}

/// Append `title` unless already present. Returns `true` if it was appended.
pub(crate) fn push_unique(list: &mut Vec<String>, title: &str) -> bool {
    if list.iter().any(|t| t == title) {
        return false;
    }
    list.push(title.to_string());
    true
}

fn remove_title(list: &mut Vec<String>, title: &str) -> bool {
    let before = list.len();
    list.retain(|t| t != title);
    list.len() != before
}

fn dedup_in_order(list: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    list.retain(|t| seen.insert(t.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_is_isolated() {
        let entry = Entry::new("hello");
        assert_eq!(entry.title(), "hello");
        assert!(entry.is_isolated());
    }

    #[test]
    fn add_child_ignores_duplicates() {
        let mut entry = Entry::new("a");
        assert!(entry.add_child("b"));
        assert!(!entry.add_child("b"));
        assert_eq!(entry.children_titles(), ["b"]);
    }

    #[test]
    fn remove_parent_reports_presence() {
        let mut entry = Entry::new("a");
        entry.add_parent("p");
        assert!(entry.remove_parent("p"));
        assert!(!entry.remove_parent("p"));
        assert!(entry.parent_titles().is_empty());
    }

    #[test]
    fn insertion_order_is_kept() {
        let mut entry = Entry::new("a");
        for child in ["z", "m", "b"] {
            entry.add_child(child);
        }
        assert_eq!(entry.children_titles(), ["z", "m", "b"]);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let mut entry = Entry::new("a");
        entry.add_parent("p");
        let json = serde_json::to_value(&entry).expect("serialize entry");
        assert_eq!(json["title"], "a");
        assert_eq!(json["parentTitles"][0], "p");
        assert!(json["childrenTitles"].as_array().is_some_and(Vec::is_empty));
    }

    #[test]
    fn missing_lists_deserialize_as_empty() {
        let entry: Entry = serde_json::from_str(r#"{"title":"solo"}"#).expect("parse entry");
        assert!(entry.is_isolated());
    }

    #[test]
    fn dedup_relations_keeps_first_occurrence() {
        let mut entry: Entry = serde_json::from_str(
            r#"{"title":"a","parentTitles":["p","q","p"],"childrenTitles":["c","c"]}"#,
        )
        .expect("parse entry");
        entry.dedup_relations();
        assert_eq!(entry.parent_titles(), ["p", "q"]);
        assert_eq!(entry.children_titles(), ["c"]);
    }
}
