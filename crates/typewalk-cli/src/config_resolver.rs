//! Configuration file resolution with global fallback.
//!
//! Resolves the configuration file path using a deterministic priority order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `typewalk.toml` or `.typewalk.toml` in the project directory or the
//!    nearest ancestor that has one
//! 3. `~/.typewalk/config.toml` (global fallback)
//! 4. No config found → defaults

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use typewalk_core::Config;

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found in the project directory or one of its ancestors.
    Project(PathBuf),
    /// Loaded from the global config directory (`~/.typewalk/`).
    Global(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Loads the configuration this source points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            return Ok(Config::default());
        };

        if matches!(self, Self::Global(_)) {
            tracing::info!("Using global config: {}", path.display());
        }

        Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["typewalk.toml", ".typewalk.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration file for `target`, a directory or a file.
///
/// See module-level docs for resolution order.
#[must_use]
pub fn resolve(target: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(target, explicit, global_config_dir())
}

/// Testable core: accepts `global_dir` as parameter to avoid env var races.
fn resolve_inner(target: &Path, explicit: Option<&Path>, global_dir: Option<PathBuf>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    let start = if target.is_file() {
        target.parent().unwrap_or(target)
    } else {
        target
    };

    if let Some(found) = find_project_config(start) {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    if let Some(dir) = global_dir {
        let candidate = dir.join(GLOBAL_CONFIG_NAME);
        if candidate.is_file() {
            tracing::debug!("Found global config: {}", candidate.display());
            return ConfigSource::Global(candidate);
        }
    }

    ConfigSource::Default
}

/// Searches `start` and then each ancestor for a project config file.
fn find_project_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

/// Returns the global config directory path.
///
/// Resolution: `$TYPEWALK_CONFIG_DIR` > `~/.typewalk/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("TYPEWALK_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".typewalk"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_takes_priority_over_project() {
        let tmp = TempDir::new().unwrap();
        let explicit = tmp.path().join("custom.toml");
        fs::write(&explicit, "").unwrap();
        fs::write(tmp.path().join("typewalk.toml"), "").unwrap();

        let result = resolve_inner(tmp.path(), Some(&explicit), None);
        assert_eq!(result, ConfigSource::Explicit(explicit));
    }

    #[test]
    fn typewalk_toml_preferred_over_dot_prefix() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("typewalk.toml"), "").unwrap();
        fs::write(tmp.path().join(".typewalk.toml"), "").unwrap();

        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(result, ConfigSource::Project(tmp.path().join("typewalk.toml")));
    }

    #[test]
    fn dot_typewalk_toml_found() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".typewalk.toml"), "").unwrap();

        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(result, ConfigSource::Project(tmp.path().join(".typewalk.toml")));
    }

    #[test]
    fn nearest_ancestor_config_wins() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("packages/app/src");
        fs::create_dir_all(&nested).unwrap();
        fs::write(tmp.path().join("typewalk.toml"), "").unwrap();
        fs::write(tmp.path().join("packages/app/typewalk.toml"), "").unwrap();

        let result = resolve_inner(&nested, None, None);
        assert_eq!(
            result,
            ConfigSource::Project(tmp.path().join("packages/app/typewalk.toml"))
        );
    }

    #[test]
    fn file_target_searches_from_its_directory() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("typewalk.toml"), "").unwrap();
        let file = tmp.path().join("index.ts");
        fs::write(&file, "").unwrap();

        let result = resolve_inner(&file, None, None);
        assert_eq!(result, ConfigSource::Project(tmp.path().join("typewalk.toml")));
    }

    #[test]
    fn global_fallback_when_no_project_config() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Global(global.path().join("config.toml")));
    }

    #[test]
    fn global_dir_without_config_file_returns_default() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Default);
    }

    #[test]
    fn default_source_loads_default_config() {
        let config = ConfigSource::Default.load().unwrap();
        assert!(config.rules.is_empty());
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("typewalk.toml");
        fs::write(&path, "[rules.typedef\n").unwrap();

        let err = ConfigSource::Project(path).load().unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }

    #[test]
    fn load_reads_rule_options() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("typewalk.toml");
        fs::write(&path, "[rules.typedef]\noptions = [\"parameter\"]\n").unwrap();

        let config = ConfigSource::Explicit(path).load().unwrap();
        assert!(config.rule_options("typedef").has_option("parameter"));
    }
}
