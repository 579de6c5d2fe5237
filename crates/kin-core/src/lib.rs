//! kin-core library.
//!
//! A free-form graph of titled entries joined by parent → child edges, and a
//! classifier that sorts the entries around a focus into twelve family-style
//! relations (children, parents, grandchildren, spouses, siblings, niblings,
//! and so on).
//!
//! ```rust,ignore
//! use kin_core::model::EntryStore;
//! use kin_core::relations::Scope;
//!
//! let mut store = EntryStore::new();
//! store.give("A").as_child("B")?;
//! store.give("B").as_parent("E")?;
//! let set = store.relations("A", &Scope::All);
//! assert_eq!(set.du, ["E"]);
//! ```
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` enums carrying an [`error::ErrorCode`];
//!   `anyhow::Result` only for config loading.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod config;
pub mod equality;
pub mod error;
pub mod graph;
pub mod lock;
pub mod model;
pub mod persist;
pub mod relations;
