//! Lint-run orchestration: discover, parse, evaluate, aggregate.

use crate::config::Config;
use crate::host::{HostError, SourceHost};
use crate::rule::{evaluate, Rule, RuleBox};
use crate::source::SourceFile;
use crate::types::{Failure, LintResult};
use crate::utils::allowance::AllowDirectives;

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Source file contains syntax errors and parse errors are fatal.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The host could not parse a file.
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// No host was supplied to the builder.
    #[error("No source host configured")]
    MissingHost,
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    host: Option<Box<dyn SourceHost>>,
    files: Option<Vec<PathBuf>>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Sets the host used to parse source files.
    #[must_use]
    pub fn host<H: SourceHost + 'static>(mut self, host: H) -> Self {
        self.host = Some(Box::new(host));
        self
    }

    /// Uses an explicit file list instead of discovering files under the root.
    #[must_use]
    pub fn files(mut self, files: Vec<PathBuf>) -> Self {
        self.files = Some(files);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether syntax errors abort the run (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if no host was set or the current directory is
    /// unavailable.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let host = self.host.ok_or(AnalyzerError::MissingHost)?;

        let root = self
            .root
            .or_else(|| self.config.as_ref().map(|c| c.linter.root.clone()))
            .unwrap_or_else(|| PathBuf::from("."));

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let config = self.config.unwrap_or_default();
        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.linter.exclude.iter().cloned());

        Ok(Analyzer {
            root,
            rules: self.rules,
            host,
            files: self.files,
            exclude_patterns,
            config,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

/// Runs a set of rules over many files.
///
/// Every (rule, file) pair is evaluated independently with its own walker;
/// files are processed in parallel and the parsed tree is only ever read.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    host: Box<dyn SourceHost>,
    files: Option<Vec<PathBuf>>,
    exclude_patterns: Vec<String>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Analyzes all files and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or reading fails, or if a file has
    /// syntax errors and `fail_on_parse_error` is set. Rule faults are not
    /// errors; they are collected in [`LintResult::errors`].
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let files: Vec<PathBuf> = match &self.files {
            Some(files) => files
                .iter()
                .filter(|path| !self.should_exclude(path))
                .cloned()
                .collect(),
            None => self.discover_files()?,
        };

        info!("Found {} files to analyze", files.len());

        let outcomes: Vec<Result<LintResult, AnalyzerError>> = files
            .par_iter()
            .map(|path| self.analyze_file(path))
            .collect();

        let mut result = LintResult::new();
        for outcome in outcomes {
            result.extend(outcome?);
        }
        result.sort();

        info!(
            "Analysis complete: {} failures, {} rule errors in {} files",
            result.failures.len(),
            result.errors.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Lints one in-memory file.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot parse the text, or if it has
    /// syntax errors and `fail_on_parse_error` is set.
    pub fn lint_source(&self, file_name: &Path, text: &str) -> Result<LintResult, AnalyzerError> {
        let file = self.host.parse(file_name, text)?;

        if let Some(first) = file.syntax_errors().first() {
            let position = file.line_and_character(first.start);
            let message = format!(
                "{} syntax error(s), first at {}:{}",
                file.syntax_errors().len(),
                position.line + 1,
                position.character + 1
            );
            if self.fail_on_parse_error {
                return Err(AnalyzerError::Parse {
                    path: file_name.to_path_buf(),
                    message,
                });
            }
            warn!("{}: {}", file_name.display(), message);
        }

        let mut result = self.run_rules(&file);
        result.files_checked = 1;
        result.sort();
        Ok(result)
    }

    fn analyze_file(&self, path: &Path) -> Result<LintResult, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let text = std::fs::read_to_string(path)?;
        let display_path = path.strip_prefix(&self.root).unwrap_or(path);
        self.lint_source(display_path, &text)
    }

    fn run_rules(&self, file: &SourceFile) -> LintResult {
        let mut result = LintResult::new();
        let allowances = AllowDirectives::from_source(file);

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            match evaluate(rule.as_ref(), file) {
                Ok(failures) => {
                    result
                        .failures
                        .extend(failures.into_iter().filter(|f| !is_allowed(&allowances, f)));
                }
                Err(error) => result.errors.push(error),
            }
        }

        result
    }

    /// Discovers all files under the root that the host can parse.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let mut files = Vec::new();

        for ext in self.host.extensions() {
            let pattern = format!("{}/**/*.{ext}", self.root.display());
            for entry in glob::glob(&pattern)? {
                let path = entry.map_err(|e| AnalyzerError::Io(e.into_error()))?;

                if self.should_exclude(&path) {
                    debug!("Excluding: {}", path.display());
                    continue;
                }

                files.push(path);
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let candidates = [path.to_string_lossy(), relative.to_string_lossy()];

        self.exclude_patterns.iter().any(|pattern| {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if candidates.iter().any(|c| glob_pattern.matches(c)) {
                    return true;
                }
            }

            // Also check as substring for patterns like "**/node_modules/**"
            let normalized_pattern = pattern.replace("**", "");
            normalized_pattern.len() > 1
                && !normalized_pattern.contains('*')
                && candidates.iter().any(|c| c.contains(&normalized_pattern))
        })
    }
}

/// A directive may sit above the failure itself or above the start of the
/// declaration it was raised for.
fn is_allowed(allowances: &AllowDirectives, failure: &Failure) -> bool {
    if allowances.is_empty() {
        return false;
    }

    allowances.check(failure.line, &failure.rule_name).is_allowed()
        || (failure.declaration_line != failure.line
            && allowances
                .check(failure.declaration_line, &failure.rule_name)
                .is_allowed())
}
