//! Advisory file locks inside the entry data directory.
//!
//! A lock named `n` is the file `<data_dir>/n.lock`. [`FileKv`] takes the
//! lock of the key it touches, shared for reads and exclusive for writes.
//! Commands that load, change and save the store hold [`EDIT_LOCK`]
//! exclusively for the whole sequence, so concurrent edits are applied one
//! after the other instead of overwriting each other.
//!
//! [`FileKv`]: crate::persist::FileKv

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use fs2::FileExt;
use thiserror::Error;
use tracing::trace;

use crate::error::ErrorCode;

/// Name of the lock serializing read-modify-write edits.
pub const EDIT_LOCK: &str = "edit";

const RETRY_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    /// Any number of shared holders at once.
    Shared,
    /// A single holder, excluding shared ones too.
    Exclusive,
}

#[derive(Debug, Error)]
pub enum LockError {
    #[error("{} is still locked by another process after {waited:?}", path.display())]
    Contended { path: PathBuf, waited: Duration },

    #[error("cannot open lock file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LockError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Contended { .. } => ErrorCode::LockContention,
            Self::Open { .. } => ErrorCode::StoreWriteFailed,
        }
    }
}

/// A held lock; released on drop.
#[derive(Debug)]
pub struct StoreLock {
    file: File,
    path: PathBuf,
    mode: LockMode,
}

impl StoreLock {
    /// Take lock `name` in `data_dir`, creating the directory and lock file
    /// as needed, retrying until `timeout` has passed.
    ///
    /// # Errors
    ///
    /// [`LockError::Contended`] when another holder keeps the lock past the
    /// timeout, [`LockError::Open`] when the lock file cannot be created.
    pub fn acquire(
        data_dir: &Path,
        name: &str,
        mode: LockMode,
        timeout: Duration,
    ) -> Result<Self, LockError> {
        let path = data_dir.join(format!("{name}.lock"));
        let open_failed = |source| LockError::Open {
            path: path.clone(),
            source,
        };
        fs::create_dir_all(data_dir).map_err(open_failed)?;
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(open_failed)?;

        let started = Instant::now();
        loop {
            let attempt = match mode {
                LockMode::Shared => FileExt::try_lock_shared(&file),
                LockMode::Exclusive => FileExt::try_lock_exclusive(&file),
            };
            match attempt {
                Ok(()) => {
                    trace!(path = %path.display(), ?mode, "lock taken");
                    return Ok(Self { file, path, mode });
                }
                Err(err) if is_contended(&err) => {}
                Err(source) => return Err(LockError::Open { path, source }),
            }

            let waited = started.elapsed();
            if waited >= timeout {
                return Err(LockError::Contended { path, waited });
            }
            thread::sleep(RETRY_INTERVAL);
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn mode(&self) -> LockMode {
        self.mode
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Err(err) = FileExt::unlock(&self.file) {
            trace!(path = %self.path.display(), %err, "unlock failed");
        }
    }
}

fn is_contended(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::WouldBlock
        || err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}
