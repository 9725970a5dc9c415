//! Rule registry and presets.

use crate::typedef::{self, Typedef};
use tracing::warn;
use typewalk_core::{Config, RuleBox, RuleOptions};

/// Names of every built-in rule.
pub const RULE_NAMES: [&str; 1] = [typedef::NAME];

/// Preset configurations for typewalk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Return and parameter types.
    Recommended,
    /// Every annotation the rules know about.
    Strict,
    /// Return types only, for gradual adoption.
    Minimal,
}

impl Preset {
    /// Parses a preset name (`recommended`, `strict`, `minimal`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "recommended" => Some(Self::Recommended),
            "strict" => Some(Self::Strict),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }

    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Strict => strict_rules(),
            Self::Minimal => minimal_rules(),
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes `typedef` with `call-signature` and `parameter`.
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    vec![Box::new(Typedef::new(RuleOptions::from_flags([
        typedef::CALL_SIGNATURE,
        typedef::PARAMETER,
    ])))]
}

/// Returns the strict set of rules: `typedef` with every option.
#[must_use]
pub fn strict_rules() -> Vec<RuleBox> {
    vec![Box::new(Typedef::all())]
}

/// Returns the minimal set of rules: `typedef` with `call-signature`.
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    vec![Box::new(Typedef::new(RuleOptions::from_flags([
        typedef::CALL_SIGNATURE,
    ])))]
}

/// Returns all available rules with every option enabled.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    strict_rules()
}

/// Builds a rule by name with the given options.
#[must_use]
pub fn rule_by_name(name: &str, options: RuleOptions) -> Option<RuleBox> {
    match name {
        typedef::NAME => Some(Box::new(Typedef::new(options))),
        _ => None,
    }
}

/// Builds every rule that has an enabled section in `config`.
///
/// Sections naming unknown rules are skipped with a warning.
#[must_use]
pub fn rules_from_config(config: &Config) -> Vec<RuleBox> {
    config
        .configured_rules()
        .into_iter()
        .filter_map(|name| {
            let rule = rule_by_name(name, config.rule_options(name));
            if rule.is_none() {
                warn!("Unknown rule in configuration: {}", name);
            }
            rule
        })
        .collect()
}
