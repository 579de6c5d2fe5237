//! Whole-store save and load.

use tracing::{info, warn};

use super::PersistError;
use super::kv::KeyValueStore;
use crate::model::{Entry, EntryStore};

/// The single key the entries array is stored under.
pub const ENTRIES_KEY: &str = "entries";

/// Serialize every entry, in store order, as a JSON array.
///
/// # Errors
///
/// [`PersistError::Serialize`] if serialization fails.
pub fn to_json(store: &EntryStore) -> Result<String, PersistError> {
    serde_json::to_string(store.entries()).map_err(PersistError::Serialize)
}

/// Parse a JSON entries array.
///
/// # Errors
///
/// [`PersistError::Malformed`] when `json` is not an array of entries.
pub fn parse(json: &str) -> Result<Vec<Entry>, PersistError> {
    serde_json::from_str(json).map_err(|source| PersistError::Malformed {
        key: ENTRIES_KEY.to_string(),
        source,
    })
}

/// Write a full snapshot of `store`.
///
/// # Errors
///
/// Serialization or backend failures.
pub fn save(store: &EntryStore, kv: &mut dyn KeyValueStore) -> Result<(), PersistError> {
    let json = to_json(store)?;
    kv.set(ENTRIES_KEY, &json)?;
    info!(entries = store.len(), "saved entries");
    Ok(())
}

/// Load a snapshot into a new store. Nothing stored yet yields an empty store.
///
/// # Errors
///
/// [`PersistError::Malformed`] for unparseable data, or backend failures.
pub fn load(kv: &dyn KeyValueStore) -> Result<EntryStore, PersistError> {
    let Some(json) = kv.get(ENTRIES_KEY)? else {
        return Ok(EntryStore::new());
    };
    let store = EntryStore::from_entries(parse(&json)?);
    info!(entries = store.len(), "loaded entries");
    Ok(store)
}

/// [`load`], degrading any failure to an empty store with a warning.
pub fn load_or_empty(kv: &dyn KeyValueStore) -> EntryStore {
    load(kv).unwrap_or_else(|err| {
        warn!(error = %err, code = %err.code(), "stored entries unusable; starting empty");
        EntryStore::new()
    })
}
