//! Configuration types for typewalk.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::options::RuleOptions;

/// Top-level configuration for typewalk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Linter configuration.
    #[serde(default)]
    pub linter: LinterConfig,

    /// Per-rule configurations.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled. Rules without a section are enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Builds the option bag for a rule; empty if the rule has no section.
    #[must_use]
    pub fn rule_options(&self, rule_name: &str) -> RuleOptions {
        self.rules
            .get(rule_name)
            .map(RuleConfig::to_options)
            .unwrap_or_default()
    }

    /// Names of rules that have a configuration section and are enabled.
    #[must_use]
    pub fn configured_rules(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .rules
            .keys()
            .map(String::as_str)
            .filter(|name| self.is_rule_enabled(name))
            .collect();
        names.sort_unstable();
        names
    }
}

/// Linter-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinterConfig {
    /// Root directory to lint (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from linting.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for LinterConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: default_exclude(),
            respect_gitignore: true,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_exclude() -> Vec<String> {
    vec!["**/node_modules/**".to_string(), "**/*.d.ts".to_string()]
}

fn default_true() -> bool {
    true
}

/// Per-rule configuration.
///
/// ```toml
/// [rules.typedef]
/// options = ["call-signature", "parameter"]
/// member-variable-declaration = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Flag-style options, each set to `true`.
    #[serde(default)]
    pub options: Vec<String>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub values: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Merges flag and key-value options into one bag.
    #[must_use]
    pub fn to_options(&self) -> RuleOptions {
        let mut values: Vec<(&String, &toml::Value)> = self.values.iter().collect();
        values.sort_by(|a, b| a.0.cmp(b.0));

        values.into_iter().fold(
            RuleOptions::from_flags(self.options.iter().cloned()),
            |options, (name, value)| options.with_value(name.clone(), value.clone()),
        )
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
