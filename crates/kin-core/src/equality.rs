//! Order-insensitive comparison of record lists.
//!
//! Used to check that a saved and reloaded snapshot matches the original.
//! Each record is keyed by its `serde_json` serialization, which lists struct
//! fields in declaration order, so two records compare equal exactly when
//! every field matches.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

/// `true` when `a` and `b` hold the same set of records, ignoring order.
///
/// Records that fail to serialize make the comparison fail.
pub fn shallow_sets_equal<T: Serialize>(a: &[T], b: &[T]) -> bool {
    let (Some(left), Some(right)) = (canonical_keys(a), canonical_keys(b)) else {
        debug!("record failed to serialize; sets treated as unequal");
        return false;
    };

    if let Some(missing) = left.iter().find(|key| !right.contains(*key)) {
        debug!(%missing, "record only in left set");
        return false;
    }
    if let Some(missing) = right.iter().find(|key| !left.contains(*key)) {
        debug!(%missing, "record only in right set");
        return false;
    }
    true
}

fn canonical_keys<T: Serialize>(records: &[T]) -> Option<HashSet<String>> {
    records
        .iter()
        .map(|record| serde_json::to_string(record).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        title: &'static str,
        parents: Vec<&'static str>,
    }

    fn row(title: &'static str, parents: &[&'static str]) -> Row {
        Row {
            title,
            parents: parents.to_vec(),
        }
    }

    #[test]
    fn order_does_not_matter() {
        let a = [row("a", &[]), row("b", &["a"])];
        let b = [row("b", &["a"]), row("a", &[])];
        assert!(shallow_sets_equal(&a, &b));
    }

    #[test]
    fn field_difference_is_detected() {
        let a = [row("b", &["a"])];
        let b = [row("b", &["c"])];
        assert!(!shallow_sets_equal(&a, &b));
    }

    #[test]
    fn containment_is_checked_both_ways() {
        let a = [row("a", &[])];
        let b = [row("a", &[]), row("z", &[])];
        assert!(!shallow_sets_equal(&a, &b));
        assert!(!shallow_sets_equal(&b, &a));
    }

    #[test]
    fn empty_sets_are_equal() {
        let empty: [Row; 0] = [];
        assert!(shallow_sets_equal(&empty, &empty));
    }

    #[test]
    fn nested_list_order_still_matters() {
        // Shallow: only the outer sequence is a set.
        let a = [row("x", &["p", "q"])];
        let b = [row("x", &["q", "p"])];
        assert!(!shallow_sets_equal(&a, &b));
    }
}
