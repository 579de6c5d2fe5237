//! Relation classification around a focus entry.
//!
//! Given a focus title, [`classify`] walks at most three hops through the
//! store and sorts every entry it reaches into the twelve [`RelationCode`]
//! lists.
//!
//! | Code | Relation | Derivation |
//! |---|---|---|
//! | `d` | children | children of the focus |
//! | `u` | parents | parents of the focus |
//! | `dd` | grandchildren | children of `d` |
//! | `uu` | grandparents | parents of `u` |
//! | `du` | spouses | parents of `d`, minus the focus |
//! | `ud` | siblings | children of `u`, minus the focus |
//! | `ddu` | children-in-law | parents of `dd`, minus `d` |
//! | `dud` | stepchildren | children of `du`, minus `d` |
//! | `udd` | niblings | children of `ud`, minus `d` |
//! | `duu` | parents-in-law | parents of `du`, minus `u` |
//! | `uud` | auncles | children of `uu`, minus `u` |
//! | `udu` | stepparents | parents of `ud`, minus `u` |
//!
//! No other filtering happens across lists: an entry may show up under more
//! than one code when the graph supports it. Within one list a title appears
//! once, in first-seen order.
//!
//! Classification never mutates the store. [`EntryStore::relations`] is the
//! resolving entry point that creates a missing focus before classifying.
//!
//! Every title placed in a list also yields a [`Link`] from the entry it was
//! reached through, so a renderer can draw connecting lines without walking
//! the graph again.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use super::code::RelationCode;
use crate::model::EntryStore;
use crate::model::entry::push_unique;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The set of titles a classification may report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Scope {
    /// Every title in the store.
    #[default]
    All,
    /// Only the listed titles. Traversal still passes through entries outside
    /// the scope; they are just not reported.
    Only(HashSet<String>),
}

impl Scope {
    pub fn only<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(titles.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn admits(&self, title: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(titles) => titles.contains(title),
        }
    }
}

/// A connecting line between the entry a relation was reached through and
/// the related entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Link {
    pub from: String,
    pub to: String,
    pub code: RelationCode,
}

/// The twelve relation lists around one focus entry.
///
/// Derived on every query; never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelationSet {
    pub focus: String,
    pub d: Vec<String>,
    pub u: Vec<String>,
    pub dd: Vec<String>,
    pub uu: Vec<String>,
    pub du: Vec<String>,
    pub ud: Vec<String>,
    pub ddu: Vec<String>,
    pub dud: Vec<String>,
    pub udd: Vec<String>,
    pub duu: Vec<String>,
    pub uud: Vec<String>,
    pub udu: Vec<String>,
    pub links: Vec<Link>,
}

impl RelationSet {
    /// All lists empty.
    #[must_use]
    pub fn empty(focus: impl Into<String>) -> Self {
        Self {
            focus: focus.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn get(&self, code: RelationCode) -> &[String] {
        match code {
            RelationCode::D => &self.d,
            RelationCode::U => &self.u,
            RelationCode::Dd => &self.dd,
            RelationCode::Uu => &self.uu,
            RelationCode::Du => &self.du,
            RelationCode::Ud => &self.ud,
            RelationCode::Ddu => &self.ddu,
            RelationCode::Dud => &self.dud,
            RelationCode::Udd => &self.udd,
            RelationCode::Duu => &self.duu,
            RelationCode::Uud => &self.uud,
            RelationCode::Udu => &self.udu,
        }
    }

    fn get_mut(&mut self, code: RelationCode) -> &mut Vec<String> {
        match code {
            RelationCode::D => &mut self.d,
            RelationCode::U => &mut self.u,
            RelationCode::Dd => &mut self.dd,
            RelationCode::Uu => &mut self.uu,
            RelationCode::Du => &mut self.du,
            RelationCode::Ud => &mut self.ud,
            RelationCode::Ddu => &mut self.ddu,
            RelationCode::Dud => &mut self.dud,
            RelationCode::Udd => &mut self.udd,
            RelationCode::Duu => &mut self.duu,
            RelationCode::Uud => &mut self.uud,
            RelationCode::Udu => &mut self.udu,
        }
    }

    /// `(code, titles)` pairs in canonical code order.
    pub fn iter(&self) -> impl Iterator<Item = (RelationCode, &[String])> {
        RelationCode::ALL.into_iter().map(|code| (code, self.get(code)))
    }

    /// Every code under which `title` was classified.
    #[must_use]
    pub fn codes_of(&self, title: &str) -> Vec<RelationCode> {
        self.iter()
            .filter(|(_, titles)| titles.iter().any(|t| t == title))
            .map(|(code, _)| code)
            .collect()
    }

    /// Total number of classified titles, counting repeats across codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().map(|(_, titles)| titles.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, titles)| titles.is_empty())
    }

    fn restrict(&mut self, scope: &Scope) {
        if matches!(scope, Scope::All) {
            return;
        }
        for code in RelationCode::ALL {
            self.get_mut(code).retain(|t| scope.admits(t));
        }
        let focus = self.focus.clone();
        self.links.retain(|link| {
            scope.admits(&link.to) && (link.from == focus || scope.admits(&link.from))
        });
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Which neighbor list a hop follows.
#[derive(Clone, Copy)]
enum Hop {
    Down,
    Up,
}

struct Pass<'a> {
    store: &'a EntryStore,
    set: RelationSet,
    seen_links: HashSet<Link>,
}

impl<'a> Pass<'a> {
    fn neighbors(&self, title: &str, hop: Hop) -> &'a [String] {
        self.store
            .get(title)
            .map(|entry| match hop {
                Hop::Down => entry.children_titles(),
                Hop::Up => entry.parent_titles(),
            })
            .unwrap_or_default()
    }

    /// Extend `target` with one hop from every title in `sources`, skipping
    /// titles rejected by `keep`.
    fn derive(
        &mut self,
        target: RelationCode,
        sources: &[String],
        hop: Hop,
        keep: impl Fn(&RelationSet, &str) -> bool,
    ) {
        for source in sources {
            for related in self.neighbors(source, hop) {
                if !keep(&self.set, related.as_str()) {
                    continue;
                }
                push_unique(self.set.get_mut(target), related);
                let link = Link {
                    from: source.clone(),
                    to: related.clone(),
                    code: target,
                };
                if self.seen_links.insert(link.clone()) {
                    self.set.links.push(link);
                }
            }
        }
    }
}

/// Classify every entry within reach of `focus`.
///
/// A focus with no entry yields an empty [`RelationSet`]; use
/// [`EntryStore::relations`] to create it first.
#[must_use]
pub fn classify(store: &EntryStore, focus: &str, scope: &Scope) -> RelationSet {
    let mut pass = Pass {
        store,
        set: RelationSet::empty(focus),
        seen_links: HashSet::new(),
    };
    let origin = [focus.to_string()];
    let not_focus = |_: &RelationSet, t: &str| t != focus;
    let not_child = |set: &RelationSet, t: &str| !set.d.iter().any(|c| c == t);
    let not_parent = |set: &RelationSet, t: &str| !set.u.iter().any(|p| p == t);

    pass.derive(RelationCode::D, &origin, Hop::Down, |_, _| true);
    pass.derive(RelationCode::U, &origin, Hop::Up, |_, _| true);

    let d = pass.set.d.clone();
    let u = pass.set.u.clone();
    pass.derive(RelationCode::Dd, &d, Hop::Down, |_, _| true);
    pass.derive(RelationCode::Uu, &u, Hop::Up, |_, _| true);
    pass.derive(RelationCode::Du, &d, Hop::Up, not_focus);
    pass.derive(RelationCode::Ud, &u, Hop::Down, not_focus);

    let dd = pass.set.dd.clone();
    let uu = pass.set.uu.clone();
    let du = pass.set.du.clone();
    let ud = pass.set.ud.clone();
    pass.derive(RelationCode::Ddu, &dd, Hop::Up, not_child);
    pass.derive(RelationCode::Dud, &du, Hop::Down, not_child);
    pass.derive(RelationCode::Udd, &ud, Hop::Down, not_child);
    pass.derive(RelationCode::Duu, &du, Hop::Up, not_parent);
    pass.derive(RelationCode::Uud, &uu, Hop::Down, not_parent);
    pass.derive(RelationCode::Udu, &ud, Hop::Up, not_parent);

    let mut set = pass.set;
    set.restrict(scope);
    debug!(
        focus,
        related = set.len(),
        links = set.links.len(),
        "classified relations"
    );
    set
}

impl EntryStore {
    /// Resolve `focus` (creating it if absent) and classify its relations.
    pub fn relations(&mut self, focus: &str, scope: &Scope) -> RelationSet {
        self.get_or_create(focus);
        classify(self, focus, scope)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
