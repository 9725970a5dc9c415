//! # typewalk-core
//!
//! Core framework for linting TypeScript syntax trees.
//!
//! This crate provides the traversal engine and the rule protocol built on
//! top of it:
//!
//! - [`SourceFile`], [`Node`] and [`SyntaxKind`]: the immutable tree model
//! - [`SyntaxWalker`] and [`walk`]: depth-first traversal with per-kind hooks
//! - [`RuleWalker`]: failure log and option lookup for one rule on one file
//! - [`Rule`]: the contract every lint rule implements
//! - [`Analyzer`]: orchestrates rules over many files
//!
//! ## Example
//!
//! ```ignore
//! use typewalk_core::{Analyzer, RuleOptions};
//! use typewalk_rules::Typedef;
//! use typewalk_ts::TypeScriptHost;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .host(TypeScriptHost::new())
//!     .rule(Typedef::new(RuleOptions::from_flags(["call-signature"])))
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! for failure in &result.failures {
//!     println!("{failure}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod host;
mod options;
mod rule;
mod rule_walker;
mod source;
mod syntax;
mod types;
mod walker;

/// Utility modules for the analyzer and rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{Config, ConfigError, LinterConfig, RuleConfig};
pub use host::{HostError, SourceHost};
pub use options::RuleOptions;
pub use rule::{apply_with_walker, evaluate, Rule, RuleBox, RuleEvaluationError};
pub use rule_walker::{RuleVisitor, RuleWalker};
pub use source::{LineAndCharacter, Node, SourceFile};
pub use syntax::{Field, NodeId, SyntaxKind, SyntaxTree, SyntaxTreeBuilder, TextRange};
pub use types::{Failure, FailureDiagnostic, LintResult};
pub use walker::{walk, walk_children, SyntaxWalker, WalkAction};
