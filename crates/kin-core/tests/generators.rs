#![allow(dead_code)]

use kin_core::graph::detach;
use kin_core::model::EntryStore;
use proptest::prelude::*;

/// One edit as issued by a user interface.
#[derive(Debug, Clone)]
pub enum Op {
    AsChild(String, String),
    AsParent(String, String),
    Detach(String, String),
}

impl Op {
    /// Apply to `store`, ignoring rejected self-relations.
    pub fn apply(&self, store: &mut EntryStore) {
        match self {
            Self::AsChild(a, b) => {
                let _ = store.give(a).as_child(b);
            }
            Self::AsParent(a, b) => {
                let _ = store.give(a).as_parent(b);
            }
            Self::Detach(a, b) => {
                detach(store, a, b);
            }
        }
    }

    pub fn pair(&self) -> (&str, &str) {
        match self {
            Self::AsChild(a, b) | Self::AsParent(a, b) | Self::Detach(a, b) => (a, b),
        }
    }
}

/// Titles from a small alphabet so edits collide often.
pub fn arb_title() -> impl Strategy<Value = String> + Clone {
    prop::sample::select(vec!["A", "B", "C", "D", "E", "F", "G"]).prop_map(str::to_string)
}

pub fn arb_op() -> impl Strategy<Value = Op> + Clone {
    prop_oneof![
        4 => (arb_title(), arb_title()).prop_map(|(a, b)| Op::AsChild(a, b)),
        4 => (arb_title(), arb_title()).prop_map(|(a, b)| Op::AsParent(a, b)),
        1 => (arb_title(), arb_title()).prop_map(|(a, b)| Op::Detach(a, b)),
    ]
}

pub fn arb_ops() -> impl Strategy<Value = Vec<Op>> + Clone {
    prop::collection::vec(arb_op(), 0..60)
}

pub fn build(ops: &[Op]) -> EntryStore {
    let mut store = EntryStore::new();
    for op in ops {
        op.apply(&mut store);
    }
    store
}
