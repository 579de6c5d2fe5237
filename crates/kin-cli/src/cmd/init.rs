use anyhow::{Context as _, Result};
use clap::Args;
use kin_core::config::{DEFAULT_PROJECT_CONFIG, PROJECT_DIR, project_config_path};
use std::path::Path;

use crate::project::create_project_dir;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Rewrite `.kin/config.toml` even if the project already exists. Stored
    /// entries are kept.
    #[arg(long)]
    pub force: bool,
}

const GITIGNORE: &str = "*.lock\n.*.tmp\n";

/// Execute `kin init`. Creates the project skeleton:
///
/// ```text
/// .kin/
///   config.toml   (default project config template)
///   .gitignore    (lock and temp files)
/// ```
///
/// # Errors
///
/// Returns an error if `.kin/` already exists and `--force` is not set,
/// or if any filesystem operation fails.
pub fn run_init(args: &InitArgs, project_root: &Path) -> Result<()> {
    let kin_dir = project_root.join(PROJECT_DIR);

    if kin_dir.exists() && !args.force {
        anyhow::bail!(".kin/ already exists. Use `kin init --force` to reinitialize.");
    }

    create_project_dir(project_root)?;

    let config_path = project_config_path(project_root);
    std::fs::write(&config_path, DEFAULT_PROJECT_CONFIG)
        .with_context(|| format!("Failed to write config: {}", config_path.display()))?;

    let gitignore_path = kin_dir.join(".gitignore");
    std::fs::write(&gitignore_path, GITIGNORE)
        .with_context(|| format!("Failed to write .gitignore: {}", gitignore_path.display()))?;

    println!("✓ Initialized .kin/ project structure.");
    println!();
    println!("  Config:       .kin/config.toml");
    println!();
    println!("Next steps:");
    println!("  Link two entries:");
    println!("    kin give \"Ada\" --child \"Byron\"");
    println!("  Show the relations around one:");
    println!("    kin show \"Ada\"");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn fresh_init_creates_structure() -> Result<()> {
        let root = tempfile::tempdir()?;
        run_init(&InitArgs { force: false }, root.path())?;

        assert!(root.path().join(".kin").is_dir());
        assert!(root.path().join(".kin/config.toml").is_file());
        assert!(root.path().join(".kin/.gitignore").is_file());
        Ok(())
    }

    #[test]
    fn reinit_without_force_fails() -> Result<()> {
        let root = tempfile::tempdir()?;
        run_init(&InitArgs { force: false }, root.path())?;
        assert!(run_init(&InitArgs { force: false }, root.path()).is_err());
        Ok(())
    }

    #[test]
    fn reinit_with_force_keeps_entries() -> Result<()> {
        let root = tempfile::tempdir()?;
        run_init(&InitArgs { force: false }, root.path())?;
        let entries = root.path().join(".kin/entries.json");
        fs::write(&entries, "[]")?;
        fs::write(project_config_path(root.path()), "garbage")?;

        run_init(&InitArgs { force: true }, root.path())?;
        assert!(entries.is_file());
        assert_eq!(
            fs::read_to_string(project_config_path(root.path()))?,
            DEFAULT_PROJECT_CONFIG
        );
        Ok(())
    }
}
