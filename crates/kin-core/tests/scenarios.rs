//! End-to-end behavior of the editor, classifier, and layout on small
//! hand-built graphs.

use kin_core::graph::cycles::find_all_cycles;
use kin_core::graph::{CyclePolicy, EdgeChange, EditError};
use kin_core::model::EntryStore;
use kin_core::relations::{Column, Layout, RelationCode, Scope, classify};

/// Graph used by most classification checks, as parent → child edges:
///
/// ```text
/// K → F    F → A    F → G    N → G    G → M
/// I → H    H → E    E → B    E → L
/// A → B    B → C    B → D    J → D
/// ```
fn family() -> EntryStore {
    let mut store = EntryStore::new();
    store.give("A").as_child("B").expect("A>B");
    store.give("B").as_child("C").expect("B>C");
    store.give("B").as_child("D").expect("B>D");
    store.give("B").as_parent("E").expect("E>B");
    store.give("A").as_parent("F").expect("F>A");
    store.give("F").as_child("G").expect("F>G");
    store.give("F").as_parent("K").expect("K>F");
    store.give("E").as_parent("H").expect("H>E");
    store.give("E").as_child("L").expect("E>L");
    store.give("H").as_parent("I").expect("I>H");
    store.give("D").as_parent("J").expect("J>D");
    store.give("G").as_child("M").expect("G>M");
    store.give("G").as_parent("N").expect("N>G");
    store
}

#[test]
fn flipping_a_link_keeps_only_the_latest_direction() {
    let mut store = EntryStore::new();
    store.give("A").as_child("B").expect("first");
    let outcome = store.give("B").as_child("A").expect("second");
    assert_eq!(outcome.change, EdgeChange::Flipped);

    let a = store.get("A").expect("A");
    let b = store.get("B").expect("B");
    assert!(!a.has_child("B"));
    assert!(b.has_child("A"));
    assert!(a.has_parent("B"));
    assert!(!b.has_parent("A"));
}

#[test]
fn focus_a_sees_all_twelve_relations() {
    let store = family();
    let set = classify(&store, "A", &Scope::All);

    assert_eq!(set.d, ["B"]);
    assert_eq!(set.u, ["F"]);
    assert_eq!(set.dd, ["C", "D"]);
    assert_eq!(set.uu, ["K"]);
    assert_eq!(set.du, ["E"]);
    assert_eq!(set.ud, ["G"]);
    assert_eq!(set.ddu, ["J"]);
    assert_eq!(set.dud, ["L"]);
    assert_eq!(set.udd, ["M"]);
    assert_eq!(set.duu, ["H"]);
    assert!(set.uud.is_empty());
    assert_eq!(set.udu, ["N"]);
    assert!(!set.duu.contains(&"F".to_string()));
}

#[test]
fn focus_c_sees_auncle_through_grandparent() {
    let store = family();
    let set = classify(&store, "C", &Scope::All);
    assert!(set.uud.contains(&"L".to_string()));
    assert_eq!(set.u, ["B"]);
    assert_eq!(set.ud, ["D"]);
}

#[test]
fn unknown_focus_on_empty_store_is_created_with_no_relations() {
    let mut store = EntryStore::new();
    let set = store.relations("X", &Scope::only(Vec::<String>::new()));
    for code in RelationCode::ALL {
        assert!(set.get(code).is_empty(), "{code} should be empty");
    }
    assert!(set.links.is_empty());
    assert!(store.contains("X"));
    assert_eq!(store.len(), 1);
}

#[test]
fn get_or_create_is_idempotent() {
    let mut store = EntryStore::new();
    store.get_or_create("A");
    let before = store.len();
    let again = store.get_or_create("A").clone();
    assert_eq!(store.len(), before);
    assert_eq!(again.title(), "A");
}

#[test]
fn layout_places_focus_a_relations_in_columns() {
    let store = family();
    let layout = Layout::from_relations(&classify(&store, "A", &Scope::All));

    let titles = |column: Column| -> Vec<String> {
        layout
            .column(column)
            .map(|slot| slot.cells.iter().map(|cell| cell.title.clone()).collect())
            .unwrap_or_default()
    };

    assert_eq!(titles(Column::Grandparents), ["K"]);
    assert_eq!(titles(Column::Parents), ["F", "H", "N"]);
    assert_eq!(titles(Column::Focus), ["A", "E", "G"]);
    assert_eq!(titles(Column::Children), ["B", "J", "L", "M"]);
    assert_eq!(titles(Column::Grandchildren), ["C", "D"]);
    assert_eq!(layout.position_of("A"), Some((Column::Focus, 0)));
    assert_eq!(layout.position_of("I"), None);
}

#[test]
fn scoped_query_hides_but_still_traverses() {
    let store = family();
    let set = classify(&store, "A", &Scope::only(["C", "D", "K"]));
    assert!(set.d.is_empty());
    assert!(set.u.is_empty());
    assert_eq!(set.dd, ["C", "D"]);
    assert_eq!(set.uu, ["K"]);
}

#[test]
fn reject_policy_refuses_ancestor_cycle() {
    let mut store = family();
    let err = store
        .give("C")
        .with_policy(CyclePolicy::Reject)
        .as_child("A")
        .expect_err("C is a descendant of A");
    assert!(matches!(err, EditError::CycleDetected(_)));
    assert!(!store.get("C").expect("C").has_child("A"));
}

#[test]
fn warn_policy_applies_and_reports_cycle() {
    let mut store = family();
    let outcome = store.give("C").as_child("A").expect("warn applies");
    let cycle = outcome.cycle.expect("cycle reported");
    assert_eq!(cycle.cycle_path, ["C", "A", "B", "C"]);
    assert!(store.get("A").expect("A").has_parent("C"));
    assert!(store.asymmetric_edges().is_empty());
}

#[test]
fn self_relation_is_refused_without_creating_entries() {
    let mut store = EntryStore::new();
    let err = store.give("solo").as_parent("solo").expect_err("self");
    assert_eq!(err, EditError::SelfRelation("solo".to_string()));
    assert!(store.is_empty());
}

const DEEP_CHAIN: usize = 30_000;

fn link_title(i: usize) -> String {
    format!("e{i}")
}

#[test]
fn deep_chain_built_bottom_up_links_every_generation() {
    let mut store = EntryStore::new();
    for i in (0..DEEP_CHAIN).rev() {
        let outcome = store
            .give(&link_title(i))
            .as_child(&link_title(i + 1))
            .expect("link");
        assert!(outcome.cycle.is_none());
    }

    assert_eq!(store.len(), DEEP_CHAIN + 1);
    assert!(store.get("e0").expect("root").parent_titles().is_empty());
    assert_eq!(
        store.get(&link_title(DEEP_CHAIN)).expect("leaf").parent_titles(),
        [link_title(DEEP_CHAIN - 1)]
    );
    assert!(find_all_cycles(&store).is_empty());
}

#[test]
fn closing_a_deep_chain_reports_the_full_loop() {
    let mut store = EntryStore::new();
    for i in 0..DEEP_CHAIN {
        store
            .give(&link_title(i))
            .as_child(&link_title(i + 1))
            .expect("link");
    }

    let leaf = link_title(DEEP_CHAIN);
    let err = store
        .give(&leaf)
        .with_policy(CyclePolicy::Reject)
        .as_child("e0")
        .expect_err("closes the chain");
    let EditError::CycleDetected(cycle) = err else {
        panic!("expected a cycle, got {err:?}");
    };
    assert_eq!(cycle.cycle_len(), DEEP_CHAIN + 1);
    assert_eq!(cycle.cycle_path.first(), Some(&leaf));
    assert_eq!(cycle.cycle_path.last(), Some(&leaf));

    store.give(&leaf).as_child("e0").expect("warn applies");
    let cycles = find_all_cycles(&store);
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].cycle_len(), DEEP_CHAIN + 1);
}
