//! Entry data model and the owned entry store.
//!
//! - [`entry`]: the titled node with ordered parent/child title lists.
//! - [`store`]: [`EntryStore`], the get-or-create collection of entries.

pub mod entry;
pub mod store;

pub use entry::Entry;
pub use store::EntryStore;
