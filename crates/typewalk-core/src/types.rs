//! Failure records and aggregated lint results.

use miette::{Diagnostic, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::rule::RuleEvaluationError;

/// A single diagnostic raised by a rule.
///
/// Created once when a rule detects a violation and never modified after
/// it has been added to a walker's failure log.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Failure {
    /// File the failure belongs to.
    pub file_name: PathBuf,
    /// Name of the rule that raised it (e.g., "typedef").
    pub rule_name: String,
    /// Human-readable message.
    pub message: String,
    /// Byte offset where the failure starts.
    pub start: usize,
    /// Length of the failure in bytes.
    pub width: usize,
    /// Zero-based line of `start`.
    pub line: usize,
    /// Zero-based byte column of `start`.
    pub character: usize,
    /// Zero-based line where the flagged construct begins. Equals `line`
    /// unless the rule reported against a node spanning several lines.
    pub declaration_line: usize,
}

impl Failure {
    /// Byte offset one past the end of the failure.
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.width
    }

    /// Formats the failure for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        format!(
            "{} at {}:{}:{}\n  {}\n",
            self.rule_name,
            self.file_name.display(),
            self.line + 1,
            self.character + 1,
            self.message,
        )
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[{}, {}]: {}",
            self.file_name.display(),
            self.line + 1,
            self.character + 1,
            self.message
        )
    }
}

/// Adapts a [`Failure`] to a miette diagnostic for rich rendering.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct FailureDiagnostic {
    message: String,
    #[label("{rule_name}")]
    span: SourceSpan,
    rule_name: String,
}

impl From<&Failure> for FailureDiagnostic {
    fn from(f: &Failure) -> Self {
        Self {
            message: f.message.clone(),
            span: SourceSpan::from((f.start, f.width)),
            rule_name: f.rule_name.clone(),
        }
    }
}

/// Result of a lint run.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All failures, sorted by file then position.
    pub failures: Vec<Failure>,
    /// Rule evaluations that aborted with a fault.
    pub errors: Vec<RuleEvaluationError>,
    /// Number of files checked.
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if any failure or rule fault was recorded.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty() || !self.errors.is_empty()
    }

    /// Sorts failures by file, then start offset, then rule name.
    pub fn sort(&mut self) {
        self.failures.sort_by(|a, b| {
            a.file_name
                .cmp(&b.file_name)
                .then(a.start.cmp(&b.start))
                .then(a.rule_name.cmp(&b.rule_name))
        });
        self.errors.sort_by(|a, b| {
            a.file_name
                .cmp(&b.file_name)
                .then(a.rule_name.cmp(&b.rule_name))
        });
    }

    /// Adds failures and errors from another result.
    pub fn extend(&mut self, other: Self) {
        self.failures.extend(other.failures);
        self.errors.extend(other.errors);
        self.files_checked += other.files_checked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_failure(file: &str, start: usize, rule: &str) -> Failure {
        Failure {
            file_name: PathBuf::from(file),
            rule_name: rule.to_string(),
            message: "expected parameter: 'x' to have a typedef".to_string(),
            start,
            width: 1,
            line: 0,
            character: start,
            declaration_line: 0,
        }
    }

    #[test]
    fn display_uses_one_based_positions() {
        let failure = make_failure("src/a.ts", 12, "typedef");
        assert_eq!(
            failure.to_string(),
            "src/a.ts[1, 13]: expected parameter: 'x' to have a typedef"
        );
        assert_eq!(failure.end(), 13);
    }

    #[test]
    fn sort_orders_by_file_then_position() {
        let mut result = LintResult::new();
        result.failures.push(make_failure("b.ts", 1, "typedef"));
        result.failures.push(make_failure("a.ts", 9, "typedef"));
        result.failures.push(make_failure("a.ts", 2, "typedef"));
        result.sort();

        let order: Vec<(&str, usize)> = result
            .failures
            .iter()
            .map(|f| (f.file_name.to_str().unwrap(), f.start))
            .collect();
        assert_eq!(order, vec![("a.ts", 2), ("a.ts", 9), ("b.ts", 1)]);
    }

    #[test]
    fn has_failures_counts_rule_errors() {
        let mut result = LintResult::new();
        assert!(!result.has_failures());
        result.errors.push(RuleEvaluationError {
            rule_name: "typedef".to_string(),
            file_name: PathBuf::from("a.ts"),
            message: "boom".to_string(),
        });
        assert!(result.has_failures());
    }

    #[test]
    fn diagnostic_carries_span() {
        let failure = make_failure("a.ts", 4, "typedef");
        let diagnostic = FailureDiagnostic::from(&failure);
        assert_eq!(diagnostic.span.offset(), 4);
        assert_eq!(diagnostic.span.len(), 1);
    }
}
