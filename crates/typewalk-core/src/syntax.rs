//! Immutable syntax tree model shared by every walker and rule.
//!
//! Trees are produced by a host (see [`crate::SourceHost`]) through
//! [`SyntaxTreeBuilder`] and never mutated afterwards. Nodes live in an
//! arena; parents own their children exclusively and every non-root node
//! records the single parent whose children include it.

use serde::{Deserialize, Serialize};

/// Grammatical category of a syntax node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyntaxKind {
    /// Root of a parsed file.
    SourceFile,

    /// Plain identifier, including property and type names.
    Identifier,
    /// `#private` member name.
    PrivateIdentifier,
    /// `"text"` or `'text'`.
    StringLiteral,
    /// `42`, `0x1f`, `1e3`.
    NumericLiteral,
    /// `true` / `false`.
    BooleanLiteral,
    /// `null`.
    NullLiteral,
    /// `[expr]` used as a property name.
    ComputedPropertyName,

    /// `class C {}`
    ClassDeclaration,
    /// `const C = class {}`
    ClassExpression,
    /// `interface I {}`
    InterfaceDeclaration,
    /// `type T = ...`
    TypeAliasDeclaration,
    /// `enum E {}`
    EnumDeclaration,
    /// `namespace N {}` / `module M {}`
    ModuleDeclaration,

    /// `function f() {}`
    FunctionDeclaration,
    /// `function () {}` in expression position.
    FunctionExpression,
    /// `() => {}`
    ArrowFunction,
    /// Method in a class body or object literal.
    MethodDeclaration,
    /// Method in an interface or type literal.
    MethodSignature,
    /// Class `constructor(...) {}`.
    Constructor,
    /// `get x() {}`
    GetAccessor,
    /// `set x(v) {}`
    SetAccessor,
    /// `(x): T` member of an interface or type literal.
    CallSignature,
    /// `new (x): T` member of an interface or type literal.
    ConstructSignature,
    /// `[key: string]: T`
    IndexSignature,
    /// Parenthesized parameter list of a signature.
    ParameterList,
    /// One formal parameter.
    Parameter,
    /// Class field.
    PropertyDeclaration,
    /// Interface or type-literal property.
    PropertySignature,
    /// `let a, b` / `const c` / `var d`
    VariableDeclarationList,
    /// One binding inside a declaration list or catch clause.
    VariableDeclaration,

    /// `{ ... }` in expression position.
    ObjectLiteralExpression,
    /// `key: value` inside an object literal.
    PropertyAssignment,
    /// `{ key }` inside an object literal.
    ShorthandPropertyAssignment,
    /// `{ ...rest }` inside an object literal.
    SpreadAssignment,

    /// `{ ... }` statement block.
    Block,
    /// `for (;;)`
    ForStatement,
    /// `for (x in y)`
    ForInStatement,
    /// `for (x of y)`
    ForOfStatement,
    /// `try {} catch {} finally {}`
    TryStatement,
    /// `catch (e) {}`
    CatchClause,

    /// `a + b`, `a = b`, `a && b`.
    BinaryExpression,
    /// `f(x)`
    CallExpression,

    /// `Foo`, `Foo<T>`, `ns.Foo`.
    TypeReference,
    /// `string`, `number`, `any`, `void`.
    PredefinedType,
    /// `"tag"`, `1`, `true` used as a type.
    LiteralType,
    /// `{ a: T }` used as a type, or an interface body.
    TypeLiteral,

    /// Any other named construct; still walked, never dispatched.
    Unknown,
}

/// Role a child node plays inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    /// Declared name.
    Name,
    /// Declared type, or return type of a signature.
    Type,
    /// Parameter list of a signature.
    Parameters,
    /// Initializer or assigned value.
    Initializer,
    /// Body block or expression.
    Body,
}

/// Half-open byte range `[start, end)` into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextRange {
    /// Byte offset of the first byte.
    pub start: usize,
    /// Byte offset one past the last byte.
    pub end: usize,
}

impl TextRange {
    /// Creates a new range. `end` is clamped so it never precedes `start`.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Length of the range in bytes.
    #[must_use]
    pub fn len(self) -> usize {
        self.end - self.start
    }

    /// Returns true if the range covers no bytes.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// Index of a node in its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The root node of every tree.
    pub const ROOT: Self = Self(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct NodeData {
    pub(crate) kind: SyntaxKind,
    pub(crate) field: Option<Field>,
    pub(crate) range: TextRange,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// An immutable, acyclic syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
}

impl SyntaxTree {
    /// Number of nodes in the tree, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always has a root, so this is never true.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

/// Builds a [`SyntaxTree`] top-down.
///
/// Children are appended in source order; a node can only be attached to a
/// parent that already exists, so the result is acyclic and every parent
/// link matches the owning children list.
#[derive(Debug)]
pub struct SyntaxTreeBuilder {
    nodes: Vec<NodeData>,
}

impl SyntaxTreeBuilder {
    /// Starts a tree whose root has the given kind and range.
    #[must_use]
    pub fn new(root_kind: SyntaxKind, range: TextRange) -> Self {
        Self {
            nodes: vec![NodeData {
                kind: root_kind,
                field: None,
                range,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Returns the id of the root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Appends a new last child to `parent` and returns its id.
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not created by this builder.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        kind: SyntaxKind,
        field: Option<Field>,
        range: TextRange,
    ) -> NodeId {
        assert!(
            parent.index() < self.nodes.len(),
            "parent {parent:?} does not belong to this builder"
        );
        #[allow(clippy::cast_possible_truncation)] // trees never approach 4G nodes
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            kind,
            field,
            range,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Finishes the tree.
    #[must_use]
    pub fn finish(self) -> SyntaxTree {
        SyntaxTree { nodes: self.nodes }
    }
}
