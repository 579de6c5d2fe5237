//! Key-value backends for persisted snapshots.
//!
//! [`FileKv`] keeps one `<key>.json` file per key in a data directory, guarded
//! by the `<key>` lock: shared for reads, exclusive for writes. Writes go
//! through a temporary file renamed into place.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use super::PersistError;
use crate::lock::{LockMode, StoreLock};

/// Default wait for a contended store lock.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(2);

/// A string key-value store holding serialized snapshots.
pub trait KeyValueStore {
    /// Value under `key`, or `None` if nothing was ever stored.
    ///
    /// # Errors
    ///
    /// Backend I/O or locking failures.
    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// Replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Backend I/O or locking failures.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// In-memory backend for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    values: HashMap<String, String>,
}

impl MemoryKv {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed store: key `k` lives in `<dir>/k.json`.
#[derive(Debug, Clone)]
pub struct FileKv {
    dir: PathBuf,
    lock_timeout: Duration,
}

impl FileKv {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the value for `key`.
    #[must_use]
    pub fn value_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn lock(&self, key: &str, mode: LockMode) -> Result<StoreLock, PersistError> {
        Ok(StoreLock::acquire(&self.dir, key, mode, self.lock_timeout)?)
    }
}

impl KeyValueStore for FileKv {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        let path = self.value_path(key);
        let _lock = self.lock(key, LockMode::Shared)?;
        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!(path = %path.display(), bytes = content.len(), "read stored value");
                Ok(Some(content))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistError::Read { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        let path = self.value_path(key);
        let _lock = self.lock(key, LockMode::Exclusive)?;

        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value).map_err(|source| PersistError::Write {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| PersistError::Write {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), bytes = value.len(), "wrote stored value");
        Ok(())
    }
}
