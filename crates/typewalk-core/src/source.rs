//! Parsed source files and borrowed node handles.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::syntax::{Field, NodeId, SyntaxKind, SyntaxTree, TextRange};

/// Zero-based line and character of a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineAndCharacter {
    /// Zero-based line number.
    pub line: usize,
    /// Zero-based byte column within the line.
    pub character: usize,
}

/// One parsed file: its name, text and syntax tree.
///
/// A `SourceFile` is read-only once constructed and may be shared between
/// threads while several rules evaluate it.
#[derive(Debug, Clone)]
pub struct SourceFile {
    file_name: PathBuf,
    text: String,
    tree: SyntaxTree,
    line_starts: Vec<usize>,
    syntax_errors: Vec<TextRange>,
    comments: Vec<TextRange>,
}

impl SourceFile {
    /// Creates a source file from an already built tree.
    #[must_use]
    pub fn new(file_name: impl Into<PathBuf>, text: impl Into<String>, tree: SyntaxTree) -> Self {
        let text = text.into();
        let line_starts = compute_line_starts(&text);
        Self {
            file_name: file_name.into(),
            text,
            tree,
            line_starts,
            syntax_errors: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Records the ranges the parser could not make sense of.
    #[must_use]
    pub fn with_syntax_errors(mut self, errors: Vec<TextRange>) -> Self {
        self.syntax_errors = errors;
        self
    }

    /// Records the ranges of comments, in source order.
    #[must_use]
    pub fn with_comments(mut self, comments: Vec<TextRange>) -> Self {
        self.comments = comments;
        self
    }

    /// Path the file was loaded from.
    #[must_use]
    pub fn file_name(&self) -> &Path {
        &self.file_name
    }

    /// Full source text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The underlying tree.
    #[must_use]
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    /// Ranges of syntax errors reported by the host.
    #[must_use]
    pub fn syntax_errors(&self) -> &[TextRange] {
        &self.syntax_errors
    }

    /// Comment ranges reported by the host.
    #[must_use]
    pub fn comments(&self) -> &[TextRange] {
        &self.comments
    }

    /// Root node of the tree.
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        Node {
            file: self,
            id: NodeId::ROOT,
        }
    }

    /// Returns a handle for `id`.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Node<'_> {
        Node { file: self, id }
    }

    /// Resolves a byte offset to a zero-based line and character.
    ///
    /// Offsets past the end of the text resolve to the last line.
    #[must_use]
    pub fn line_and_character(&self, offset: usize) -> LineAndCharacter {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        LineAndCharacter {
            line,
            character: offset.saturating_sub(line_start),
        }
    }
}

fn compute_line_starts(text: &str) -> Vec<usize> {
    let mut starts = vec![0];
    starts.extend(
        text.bytes()
            .enumerate()
            .filter(|(_, b)| *b == b'\n')
            .map(|(i, _)| i + 1),
    );
    starts
}

/// A borrowed, copyable handle to one node of a [`SourceFile`].
#[derive(Clone, Copy)]
pub struct Node<'t> {
    file: &'t SourceFile,
    id: NodeId,
}

impl<'t> Node<'t> {
    /// Arena id of this node.
    #[must_use]
    pub fn id(self) -> NodeId {
        self.id
    }

    /// The file this node belongs to.
    #[must_use]
    pub fn source_file(self) -> &'t SourceFile {
        self.file
    }

    /// Grammatical category.
    #[must_use]
    pub fn kind(self) -> SyntaxKind {
        self.file.tree.data(self.id).kind
    }

    /// Role of this node in its parent, if any.
    #[must_use]
    pub fn field(self) -> Option<Field> {
        self.file.tree.data(self.id).field
    }

    /// Byte range covered by this node.
    #[must_use]
    pub fn range(self) -> TextRange {
        self.file.tree.data(self.id).range
    }

    /// Start byte offset.
    #[must_use]
    pub fn start(self) -> usize {
        self.range().start
    }

    /// End byte offset (exclusive).
    #[must_use]
    pub fn end(self) -> usize {
        self.range().end
    }

    /// Width in bytes.
    #[must_use]
    pub fn width(self) -> usize {
        self.range().len()
    }

    /// Parent node; `None` for the root.
    #[must_use]
    pub fn parent(self) -> Option<Self> {
        self.file
            .tree
            .data(self.id)
            .parent
            .map(|id| self.file.node(id))
    }

    /// Children in source order.
    pub fn children(self) -> impl DoubleEndedIterator<Item = Node<'t>> + ExactSizeIterator {
        let file = self.file;
        file.tree
            .data(self.id)
            .children
            .iter()
            .map(move |&id| file.node(id))
    }

    /// First child playing the given role.
    #[must_use]
    pub fn child_by_field(self, field: Field) -> Option<Self> {
        self.children().find(|child| child.field() == Some(field))
    }

    /// Source text covered by this node.
    #[must_use]
    pub fn text(self) -> &'t str {
        let range = self.range();
        self.file.text.get(range.start..range.end).unwrap_or("")
    }

    /// Returns true for plain identifiers.
    #[must_use]
    pub fn is_identifier(self) -> bool {
        self.kind() == SyntaxKind::Identifier
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.file, other.file) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let range = self.range();
        write!(f, "{:?}@{}..{}", self.kind(), range.start, range.end)
    }
}
