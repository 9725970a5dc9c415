//! Walker state for one rule evaluating one file.

use crate::options::RuleOptions;
use crate::source::{Node, SourceFile};
use crate::types::Failure;
use crate::walker::SyntaxWalker;

/// Failure log and option lookup for a single (rule, file) evaluation.
///
/// Concrete rules embed a `RuleWalker` in their own walker type and
/// implement [`RuleVisitor`] for it. A `RuleWalker` belongs to exactly one
/// file; create a new one for every file.
#[derive(Debug)]
pub struct RuleWalker<'t> {
    source_file: &'t SourceFile,
    rule_name: &'t str,
    options: &'t RuleOptions,
    failures: Vec<Failure>,
}

impl<'t> RuleWalker<'t> {
    /// Creates a walker for `source_file` on behalf of `rule_name`.
    #[must_use]
    pub fn new(source_file: &'t SourceFile, rule_name: &'t str, options: &'t RuleOptions) -> Self {
        Self {
            source_file,
            rule_name,
            options,
            failures: Vec::new(),
        }
    }

    /// The file being walked.
    #[must_use]
    pub fn source_file(&self) -> &'t SourceFile {
        self.source_file
    }

    /// Root node of the file being walked.
    #[must_use]
    pub fn root(&self) -> Node<'t> {
        self.source_file.root()
    }

    /// Name of the owning rule.
    #[must_use]
    pub fn rule_name(&self) -> &'t str {
        self.rule_name
    }

    /// The rule's options.
    #[must_use]
    pub fn options(&self) -> &'t RuleOptions {
        self.options
    }

    /// Returns true if the rule was configured with `name`.
    #[must_use]
    pub fn has_option(&self, name: &str) -> bool {
        self.options.has_option(name)
    }

    /// Builds a failure tagged with this rule's name. Does not record it.
    #[must_use]
    pub fn create_failure(&self, start: usize, width: usize, message: impl Into<String>) -> Failure {
        let line = self.source_file.line_and_character(start).line;
        self.build_failure(start, width, message.into(), line)
    }

    /// Like [`RuleWalker::create_failure`], for a failure about `node`.
    ///
    /// The failure remembers the line `node` starts on, so an allow comment
    /// above a multi-line declaration covers a failure reported further down.
    #[must_use]
    pub fn create_node_failure(
        &self,
        node: Node<'t>,
        start: usize,
        width: usize,
        message: impl Into<String>,
    ) -> Failure {
        let line = self.source_file.line_and_character(node.start()).line;
        self.build_failure(start, width, message.into(), line)
    }

    fn build_failure(&self, start: usize, width: usize, message: String, declaration_line: usize) -> Failure {
        let position = self.source_file.line_and_character(start);
        Failure {
            file_name: self.source_file.file_name().to_path_buf(),
            rule_name: self.rule_name.to_string(),
            message,
            start,
            width,
            line: position.line,
            character: position.character,
            declaration_line,
        }
    }

    /// Appends a failure to the log.
    pub fn add_failure(&mut self, failure: Failure) {
        self.failures.push(failure);
    }

    /// Failures recorded so far, in detection order.
    #[must_use]
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Consumes the walker, returning its failures.
    #[must_use]
    pub fn into_failures(self) -> Vec<Failure> {
        self.failures
    }
}

impl<'t> SyntaxWalker<'t> for RuleWalker<'t> {}

/// A walker that owns a [`RuleWalker`].
pub trait RuleVisitor<'t>: SyntaxWalker<'t> + Sized {
    /// Shared rule state.
    fn rule_walker(&self) -> &RuleWalker<'t>;

    /// Consumes the visitor, returning its rule state.
    fn into_rule_walker(self) -> RuleWalker<'t>;
}

impl<'t> RuleVisitor<'t> for RuleWalker<'t> {
    fn rule_walker(&self) -> &RuleWalker<'t> {
        self
    }

    fn into_rule_walker(self) -> RuleWalker<'t> {
        self
    }
}
