//! Snapshot persistence for the entry store.
//!
//! The whole store is written under a single key (`"entries"`) as a JSON
//! array of `{ title, parentTitles, childrenTitles }` objects and restored by
//! replacing the in-memory store wholesale. There are no partial updates and
//! no format versioning.
//!
//! ## Submodules
//!
//! - [`kv`]: the key-value backends ([`MemoryKv`], [`FileKv`]).
//! - [`snapshot`]: save/load of the entries array.

#![allow(clippy::module_name_repetitions)]

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::error::ErrorCode;
use crate::lock::LockError;

pub mod kv;
pub mod snapshot;

pub use kv::{FileKv, KeyValueStore, MemoryKv};
pub use snapshot::{ENTRIES_KEY, load, load_or_empty, save};

/// Errors from reading or writing persisted entries.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("stored value under '{key}' is not a valid entries array: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Lock(#[from] LockError),

    #[error("failed to serialize entries: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl PersistError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Malformed { .. } => ErrorCode::MalformedSnapshot,
            Self::Read { .. } => ErrorCode::StoreReadFailed,
            Self::Write { .. } => ErrorCode::StoreWriteFailed,
            Self::Lock(err) => err.code(),
            Self::Serialize(_) => ErrorCode::InternalUnexpected,
        }
    }

    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }
}
