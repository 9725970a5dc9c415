//! Per-rule option bags.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Immutable mapping from option name to its configured value.
///
/// Options can be given as bare flags (`["call-signature", "parameter"]`)
/// or as a table (`parameter = true`). Names a rule does not recognize are
/// simply never asked for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleOptions {
    values: BTreeMap<String, toml::Value>,
}

impl RuleOptions {
    /// Creates an empty option bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an option bag where every flag is set to `true`.
    #[must_use]
    pub fn from_flags<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::default().with_flags(flags)
    }

    /// Adds flags set to `true`.
    #[must_use]
    pub fn with_flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for flag in flags {
            self.values.insert(flag.into(), toml::Value::Boolean(true));
        }
        self
    }

    /// Adds a named value.
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: toml::Value) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Returns true if `name` is present and not explicitly `false`.
    #[must_use]
    pub fn has_option(&self, name: &str) -> bool {
        self.values
            .get(name)
            .is_some_and(|value| value.as_bool() != Some(false))
    }

    /// Returns the raw value for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&toml::Value> {
        self.values.get(name)
    }

    /// Option names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Returns true if no options are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for RuleOptions {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_flags(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_are_present() {
        let options = RuleOptions::from_flags(["call-signature", "parameter"]);
        assert!(options.has_option("call-signature"));
        assert!(options.has_option("parameter"));
        assert!(!options.has_option("variable-declaration"));
    }

    #[test]
    fn false_value_counts_as_absent() {
        let options = RuleOptions::new()
            .with_value("parameter", toml::Value::Boolean(false))
            .with_value("limit", toml::Value::Integer(3));
        assert!(!options.has_option("parameter"));
        assert!(options.has_option("limit"));
        assert_eq!(options.get("limit").and_then(toml::Value::as_integer), Some(3));
    }

    #[test]
    fn unknown_names_are_inert() {
        let options: RuleOptions = ["no-such-option"].into_iter().collect();
        assert!(!options.has_option("call-signature"));
        assert_eq!(options.names().collect::<Vec<_>>(), vec!["no-such-option"]);
    }
}
