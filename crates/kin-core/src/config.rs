use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::graph::CyclePolicy;

/// Directory holding project config and, by default, the stored entries.
pub const PROJECT_DIR: &str = ".kin";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub graph: GraphConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Entry data directory, relative to the project root unless absolute.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// How long to wait for a lock held by another `kin` process.
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            lock_timeout_ms: default_lock_timeout_ms(),
        }
    }
}

impl StoreConfig {
    #[must_use]
    pub fn data_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.data_dir)
    }

    #[must_use]
    pub const fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    #[serde(default)]
    pub cycles: CyclePolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

/// Default contents written by `kin init`.
pub const DEFAULT_PROJECT_CONFIG: &str = "[store]\n\
    data_dir = \".kin\"\n\
    lock_timeout_ms = 2000\n\
    \n\
    [graph]\n\
    # \"warn\" keeps edits that make an entry its own ancestor; \"reject\" refuses them.\n\
    cycles = \"warn\"\n";

#[must_use]
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_DIR).join("config.toml")
}

/// Load `.kin/config.toml`, falling back to defaults when it does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_config_path(project_root);
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load `<config_dir>/kin/config.toml`, falling back to defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("kin/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Canonical output mode name for a user-supplied value.
#[must_use]
pub fn normalize_output_mode(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pretty" | "human" => Some("pretty"),
        "text" | "table" => Some("text"),
        "json" => Some("json"),
        _ => None,
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(PROJECT_DIR)
}

const fn default_lock_timeout_ms() -> u64 {
    2000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = load_project_config(dir.path())?;
        assert_eq!(config, ProjectConfig::default());
        assert_eq!(config.graph.cycles, CyclePolicy::Warn);
        assert_eq!(config.store.data_path(dir.path()), dir.path().join(".kin"));
        Ok(())
    }

    #[test]
    fn default_template_parses_to_defaults() -> Result<()> {
        let parsed: ProjectConfig = toml::from_str(DEFAULT_PROJECT_CONFIG)?;
        assert_eq!(parsed, ProjectConfig::default());
        Ok(())
    }

    #[test]
    fn partial_config_fills_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::create_dir_all(dir.path().join(PROJECT_DIR))?;
        std::fs::write(
            project_config_path(dir.path()),
            "[graph]\ncycles = \"reject\"\n",
        )?;

        let config = load_project_config(dir.path())?;
        assert_eq!(config.graph.cycles, CyclePolicy::Reject);
        assert_eq!(config.store.lock_timeout(), Duration::from_millis(2000));
        assert_eq!(config.store, StoreConfig::default());
        Ok(())
    }

    #[test]
    fn lock_timeout_is_a_store_setting() -> Result<()> {
        let parsed: ProjectConfig = toml::from_str("[store]\nlock_timeout_ms = 50\n")?;
        assert_eq!(parsed.store.lock_timeout(), Duration::from_millis(50));
        assert_eq!(parsed.store.data_dir, PathBuf::from(PROJECT_DIR));
        assert_eq!(parsed.graph, GraphConfig::default());
        Ok(())
    }

    #[test]
    fn invalid_config_reports_path() -> Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::create_dir_all(dir.path().join(PROJECT_DIR))?;
        std::fs::write(project_config_path(dir.path()), "[graph]\ncycles = \"sometimes\"\n")?;

        let err = load_project_config(dir.path()).expect_err("bad policy");
        assert!(format!("{err:#}").contains("config.toml"));
        Ok(())
    }

    #[test]
    fn absolute_data_dir_is_kept() {
        let store = StoreConfig {
            data_dir: PathBuf::from("/var/lib/kin"),
            ..StoreConfig::default()
        };
        assert_eq!(
            store.data_path(Path::new("/home/user/project")),
            PathBuf::from("/var/lib/kin")
        );
    }

    #[test]
    fn output_modes_normalize() {
        assert_eq!(normalize_output_mode(" JSON "), Some("json"));
        assert_eq!(normalize_output_mode("human"), Some("pretty"));
        assert_eq!(normalize_output_mode("table"), Some("text"));
        assert_eq!(normalize_output_mode("yaml"), None);
    }
}
