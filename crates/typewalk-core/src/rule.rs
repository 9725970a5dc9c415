//! Rule trait and the evaluation boundary.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::options::RuleOptions;
use crate::rule_walker::RuleVisitor;
use crate::source::SourceFile;
use crate::types::Failure;

/// A lint rule evaluated once per parsed file.
///
/// Rules hold their own options and keep no state between calls to
/// [`Rule::apply`]; each call builds a fresh walker for the file.
///
/// # Example
///
/// ```ignore
/// use typewalk_core::{apply_with_walker, Rule, RuleOptions, RuleWalker, SourceFile, Failure};
///
/// pub struct NoOp(RuleOptions);
///
/// impl Rule for NoOp {
///     fn name(&self) -> &'static str { "no-op" }
///     fn failure_string(&self) -> &'static str { "never raised" }
///     fn options(&self) -> &RuleOptions { &self.0 }
///
///     fn apply(&self, file: &SourceFile) -> Vec<Failure> {
///         apply_with_walker(RuleWalker::new(file, self.name(), &self.0))
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "typedef").
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Message template used when building failures.
    fn failure_string(&self) -> &'static str;

    /// Options this rule instance was configured with.
    fn options(&self) -> &RuleOptions;

    /// Walks `file` and returns the failures found, in detection order.
    ///
    /// Must not mutate the file.
    fn apply(&self, file: &SourceFile) -> Vec<Failure>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// Walks the visitor's file from the root and returns its failures.
pub fn apply_with_walker<'t, W: RuleVisitor<'t>>(mut walker: W) -> Vec<Failure> {
    let root = walker.rule_walker().root();
    walker.walk(root);
    walker.into_rule_walker().into_failures()
}

/// A rule that aborted while evaluating a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("rule '{rule_name}' failed on {}: {message}", .file_name.display())]
pub struct RuleEvaluationError {
    /// Rule that faulted.
    pub rule_name: String,
    /// File being evaluated.
    pub file_name: PathBuf,
    /// Description of the underlying fault.
    pub message: String,
}

/// Applies `rule` to `file`, isolating faults.
///
/// A panic raised while the rule walks the file aborts only this
/// evaluation and is returned as a [`RuleEvaluationError`].
///
/// # Errors
///
/// Returns an error if the rule panicked.
pub fn evaluate(rule: &dyn Rule, file: &SourceFile) -> Result<Vec<Failure>, RuleEvaluationError> {
    panic::catch_unwind(AssertUnwindSafe(|| rule.apply(file))).map_err(|payload| {
        let error = RuleEvaluationError {
            rule_name: rule.name().to_string(),
            file_name: file.file_name().to_path_buf(),
            message: panic_message(payload.as_ref()),
        };
        tracing::error!(
            rule = %error.rule_name,
            file = %error.file_name.display(),
            "rule evaluation aborted: {}",
            error.message
        );
        error
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule_walker::RuleWalker;
    use crate::syntax::{SyntaxKind, SyntaxTreeBuilder, TextRange};

    struct TestRule(RuleOptions);

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }
        fn failure_string(&self) -> &'static str {
            "test failure"
        }
        fn options(&self) -> &RuleOptions {
            &self.0
        }

        fn apply(&self, file: &SourceFile) -> Vec<Failure> {
            let mut walker = RuleWalker::new(file, self.name(), &self.0);
            let failure = walker.create_failure(0, 1, self.failure_string());
            walker.add_failure(failure);
            apply_with_walker(walker)
        }
    }

    struct PanickingRule(RuleOptions);

    impl Rule for PanickingRule {
        fn name(&self) -> &'static str {
            "panicking-rule"
        }
        fn failure_string(&self) -> &'static str {
            ""
        }
        fn options(&self) -> &RuleOptions {
            &self.0
        }
        fn apply(&self, _file: &SourceFile) -> Vec<Failure> {
            panic!("hook exploded")
        }
    }

    fn file() -> SourceFile {
        let builder = SyntaxTreeBuilder::new(SyntaxKind::SourceFile, TextRange::new(0, 1));
        SourceFile::new("a.ts", ";", builder.finish())
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule(RuleOptions::new());
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.description(), "A test rule");

        let failures = evaluate(&rule, &file()).unwrap();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].rule_name, "test-rule");
    }

    #[test]
    fn panicking_rule_becomes_evaluation_error() {
        let rule = PanickingRule(RuleOptions::new());
        let error = evaluate(&rule, &file()).unwrap_err();
        assert_eq!(error.rule_name, "panicking-rule");
        assert_eq!(error.file_name, PathBuf::from("a.ts"));
        assert_eq!(error.message, "hook exploded");
        assert!(error.to_string().contains("rule 'panicking-rule' failed on a.ts"));
    }
}
