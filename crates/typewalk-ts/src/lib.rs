//! # typewalk-ts
//!
//! Tree-sitter based TypeScript host for typewalk.
//!
//! [`TypeScriptHost`] implements [`typewalk_core::SourceHost`]: it parses a
//! file with the TypeScript (or TSX) grammar and lowers the concrete syntax
//! tree into the [`typewalk_core::SyntaxTree`] model that walkers and rules
//! operate on.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod lower;
pub mod typescript;

pub use typescript::TypeScriptHost;
