//! # typewalk-rules
//!
//! Built-in lint rules for typewalk.
//!
//! ## Available Rules
//!
//! | Name | Description |
//! |------|-------------|
//! | `typedef` | Requires type annotations, per syntactic category |
//!
//! ## Usage
//!
//! ```ignore
//! use typewalk_core::{Analyzer, RuleOptions};
//! use typewalk_rules::Typedef;
//! use typewalk_ts::TypeScriptHost;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .host(TypeScriptHost::new())
//!     .rule(Typedef::new(RuleOptions::from_flags(["call-signature", "parameter"])))
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod presets;
pub mod typedef;

pub use presets::{
    all_rules, minimal_rules, recommended_rules, rule_by_name, rules_from_config, strict_rules,
    Preset, RULE_NAMES,
};
pub use typedef::Typedef;

/// Re-export core types for convenience.
pub use typewalk_core::{Failure, Rule, RuleOptions};
