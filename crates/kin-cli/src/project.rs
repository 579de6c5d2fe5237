//! Locating the `.kin` project and loading or saving its entry store.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use kin_core::config::{PROJECT_DIR, ProjectConfig, load_project_config};
use kin_core::error::ErrorCode;
use kin_core::lock::{EDIT_LOCK, LockMode, StoreLock};
use kin_core::model::EntryStore;
use kin_core::persist::{FileKv, PersistError, load, save};
use tracing::debug;

use crate::output::{CliError, OutputMode, fail};

/// An initialized project: its parsed config and entry backend.
#[derive(Debug)]
pub struct Project {
    pub config: ProjectConfig,
    kv: FileKv,
}

/// Walk up from `start` until a directory containing `.kin/` is found.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(PROJECT_DIR).is_dir() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

impl Project {
    /// Discover the project enclosing `start`, rendering a coded error when
    /// there is none.
    pub fn discover(start: &Path, output: OutputMode) -> Result<Self> {
        let root = find_project_root(start).ok_or_else(|| {
            fail(
                output,
                &CliError::coded(
                    ErrorCode::NotInitialized,
                    "Not a kin project: .kin directory not found",
                ),
            )
        })?;

        let config = load_project_config(&root).map_err(|err| {
            fail(
                output,
                &CliError::coded(ErrorCode::ConfigParseError, format!("{err:#}")),
            )
        })?;

        let data_dir = config.store.data_path(&root);
        debug!(root = %root.display(), data_dir = %data_dir.display(), "opened project");
        let kv = FileKv::new(data_dir).with_lock_timeout(config.store.lock_timeout());
        Ok(Self { config, kv })
    }

    pub fn data_dir(&self) -> &Path {
        self.kv.dir()
    }

    /// Load the stored entries. Unreadable or malformed data is an error.
    pub fn load(&self, output: OutputMode) -> Result<EntryStore> {
        load(&self.kv).map_err(|err| persist_failure(output, &err))
    }

    /// Replace the stored snapshot with `store`.
    pub fn save(&mut self, store: &EntryStore, output: OutputMode) -> Result<()> {
        save(store, &mut self.kv).map_err(|err| persist_failure(output, &err))
    }

    /// Take the exclusive edit lock for a read-modify-write command.
    pub fn lock_for_edit(&self, output: OutputMode) -> Result<StoreLock> {
        StoreLock::acquire(
            self.data_dir(),
            EDIT_LOCK,
            LockMode::Exclusive,
            self.config.store.lock_timeout(),
        )
        .map_err(|err| fail(output, &CliError::coded(err.code(), err.to_string())))
    }

    /// Read-only view of the backend, for verification after import.
    pub const fn kv(&self) -> &FileKv {
        &self.kv
    }
}

fn persist_failure(output: OutputMode, err: &PersistError) -> anyhow::Error {
    fail(output, &CliError::coded(err.code(), err.to_string()))
}

/// Create `<root>/.kin` and return its path.
pub fn create_project_dir(root: &Path) -> Result<PathBuf> {
    let dir = root.join(PROJECT_DIR);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    Ok(dir)
}
