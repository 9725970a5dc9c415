//! Boundary to the parser that turns text into a [`SourceFile`].

use std::path::{Path, PathBuf};

use crate::source::SourceFile;

/// Errors a host can raise while producing a source file.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// The parser could not be configured for the requested language.
    #[error("failed to load grammar for {path}: {message}")]
    Language {
        /// File that was being parsed.
        path: PathBuf,
        /// Parser error message.
        message: String,
    },

    /// The parser returned no tree at all.
    #[error("parser produced no tree for {path}")]
    NoTree {
        /// File that was being parsed.
        path: PathBuf,
    },
}

/// Parses a single in-memory file into a [`SourceFile`].
///
/// Hosts parse a snapshot once; no incremental re-parse is required.
pub trait SourceHost: Send + Sync {
    /// File extensions this host handles (e.g., `&["ts", "tsx"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Parses `text` as the contents of `file_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parser cannot produce a tree.
    fn parse(&self, file_name: &Path, text: &str) -> Result<SourceFile, HostError>;

    /// Returns true if this host handles `path`.
    fn supports(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions().contains(&ext))
    }
}
