//! Graph-level mutation and integrity checks over the entry store.
//!
//! ## Submodules
//!
//! - [`editor`]: `give(title).as_child/as_parent`, the only way edges change,
//!   plus `detach`.
//! - [`cycles`]: detection of entries that are their own ancestors.

pub mod cycles;
pub mod editor;

pub use cycles::CycleWarning;
pub use editor::{CyclePolicy, EdgeChange, EditError, EditOutcome, Give, detach};
