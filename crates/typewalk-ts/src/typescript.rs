//! TypeScript host using Tree-sitter.

use std::path::Path;

use tracing::debug;
use tree_sitter::{Language, Parser};
use typewalk_core::{HostError, SourceFile, SourceHost};

use crate::lower::lower;

/// Parses `.ts`, `.tsx`, `.mts` and `.cts` files into [`SourceFile`]s.
///
/// `.tsx` files use the TSX grammar; everything else uses the plain
/// TypeScript grammar. Each call parses from scratch.
pub struct TypeScriptHost {
    typescript: Language,
    tsx: Language,
}

impl TypeScriptHost {
    /// Creates a new TypeScript host.
    #[must_use]
    pub fn new() -> Self {
        Self {
            typescript: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            tsx: tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    fn language_for(&self, path: &Path) -> &Language {
        match path.extension().and_then(|e| e.to_str()) {
            Some("tsx") => &self.tsx,
            _ => &self.typescript,
        }
    }
}

impl Default for TypeScriptHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceHost for TypeScriptHost {
    fn extensions(&self) -> &'static [&'static str] {
        &["ts", "tsx", "mts", "cts"]
    }

    fn parse(&self, file_name: &Path, text: &str) -> Result<SourceFile, HostError> {
        let mut parser = Parser::new();
        parser
            .set_language(self.language_for(file_name))
            .map_err(|e| HostError::Language {
                path: file_name.to_path_buf(),
                message: e.to_string(),
            })?;

        let tree = parser.parse(text, None).ok_or_else(|| HostError::NoTree {
            path: file_name.to_path_buf(),
        })?;

        let lowered = lower(&tree, text.as_bytes());
        debug!(
            "Parsed {}: {} nodes, {} syntax errors",
            file_name.display(),
            lowered.tree.len(),
            lowered.syntax_errors.len()
        );

        Ok(SourceFile::new(file_name, text, lowered.tree)
            .with_syntax_errors(lowered.syntax_errors)
            .with_comments(lowered.comments))
    }
}
