//! Relation classification and its rendering contract.
//!
//! ## Submodules
//!
//! - [`code`]: the twelve relation codes and their generations.
//! - [`classify`]: the read-only classifier producing a [`RelationSet`].
//! - [`layout`]: fixed code → column mapping consumed by renderers.

pub mod classify;
pub mod code;
pub mod layout;

pub use classify::{Link, RelationSet, Scope, classify};
pub use code::{RelationCode, UnknownRelationCode};
pub use layout::{Cell, Column, ColumnSlot, Layout};
