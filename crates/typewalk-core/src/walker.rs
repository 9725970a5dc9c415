//! Depth-first tree walker with per-kind visitation hooks.
//!
//! [`walk`] visits a node in three steps:
//!
//! 1. [`SyntaxWalker::visit_node`] runs for every node.
//! 2. At most one kind-specific hook runs, chosen by an exhaustive match on
//!    [`SyntaxKind`].
//! 3. Every child is walked in source order, unless the hook returned
//!    [`WalkAction::SkipChildren`].
//!
//! A hook that skips its children may still walk a subset of them itself by
//! calling [`walk`] or [`walk_children`].
//!
//! # Example
//!
//! ```ignore
//! use typewalk_core::{walk, Node, SyntaxWalker, WalkAction};
//!
//! struct ClassCounter(usize);
//!
//! impl<'t> SyntaxWalker<'t> for ClassCounter {
//!     fn visit_class_declaration(&mut self, _node: Node<'t>) -> WalkAction {
//!         self.0 += 1;
//!         WalkAction::Continue
//!     }
//! }
//!
//! let mut counter = ClassCounter(0);
//! walk(&mut counter, file.root());
//! ```

use crate::source::Node;
use crate::syntax::SyntaxKind;

/// What the walker does after a kind-specific hook returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[must_use]
pub enum WalkAction {
    /// Walk every child of the node.
    #[default]
    Continue,
    /// Do not walk the children; the hook has handled them.
    SkipChildren,
}

/// Visitation hooks for a depth-first, pre-order walk.
///
/// Every hook defaults to a no-op that lets the walk continue into the
/// node's children. Implementors override only the hooks they need.
#[allow(unused_variables)]
pub trait SyntaxWalker<'t> {
    /// Walks `node` and its subtree. See [`walk`].
    fn walk(&mut self, node: Node<'t>)
    where
        Self: Sized,
    {
        walk(self, node);
    }

    /// Runs for every node, before its kind-specific hook.
    fn visit_node(&mut self, node: Node<'t>) {}

    /// Root of the file.
    fn visit_source_file(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// `a + b`, `a = b`, ...
    fn visit_binary_expression(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// `f(x)`
    fn visit_call_expression(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// `class C {}`
    fn visit_class_declaration(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// `class {}` in expression position.
    fn visit_class_expression(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// `interface I {}`
    fn visit_interface_declaration(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// `type T = ...`
    fn visit_type_alias_declaration(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// `enum E {}`
    fn visit_enum_declaration(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// `namespace N {}`
    fn visit_module_declaration(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// `function f() {}`
    fn visit_function_declaration(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// `function () {}` in expression position.
    fn visit_function_expression(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// `() => {}`
    fn visit_arrow_function(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// Method of a class or object literal.
    fn visit_method_declaration(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// Method of an interface or type literal.
    fn visit_method_signature(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// Class constructor.
    fn visit_constructor(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// `get x() {}`
    fn visit_get_accessor(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// `set x(v) {}`
    fn visit_set_accessor(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// `(x): T` type member.
    fn visit_call_signature(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// `new (x): T` type member.
    fn visit_construct_signature(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// `[key: string]: T` type member.
    fn visit_index_signature(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// `(a, b)`
    fn visit_parameter_list(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// One formal parameter.
    fn visit_parameter(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// Class field.
    fn visit_property_declaration(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// Interface or type-literal property.
    fn visit_property_signature(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// `let a = 1, b`
    fn visit_variable_declaration_list(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// One variable binding.
    fn visit_variable_declaration(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// `{ ... }` in expression position.
    fn visit_object_literal_expression(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// `key: value`
    fn visit_property_assignment(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// `{ key }`
    fn visit_shorthand_property_assignment(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// `{ ...rest }`
    fn visit_spread_assignment(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// `{ a: T }` as a type.
    fn visit_type_literal(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// Statement block.
    fn visit_block(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// `for (;;)`
    fn visit_for_statement(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// `for (x in y)`
    fn visit_for_in_statement(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// `for (x of y)`
    fn visit_for_of_statement(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// `try {}`
    fn visit_try_statement(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }

    /// `catch (e) {}`
    fn visit_catch_clause(&mut self, node: Node<'t>) -> WalkAction {
        WalkAction::Continue
    }
}

/// Walks `node` and, unless its hook opts out, its whole subtree.
pub fn walk<'t, W>(walker: &mut W, node: Node<'t>)
where
    W: SyntaxWalker<'t> + ?Sized,
{
    walker.visit_node(node);

    if dispatch(walker, node) == WalkAction::Continue {
        walk_children(walker, node);
    }
}

/// Walks every child of `node` in source order.
pub fn walk_children<'t, W>(walker: &mut W, node: Node<'t>)
where
    W: SyntaxWalker<'t> + ?Sized,
{
    for child in node.children() {
        walk(walker, child);
    }
}

fn dispatch<'t, W>(walker: &mut W, node: Node<'t>) -> WalkAction
where
    W: SyntaxWalker<'t> + ?Sized,
{
    match node.kind() {
        SyntaxKind::SourceFile => walker.visit_source_file(node),
        SyntaxKind::BinaryExpression => walker.visit_binary_expression(node),
        SyntaxKind::CallExpression => walker.visit_call_expression(node),
        SyntaxKind::ClassDeclaration => walker.visit_class_declaration(node),
        SyntaxKind::ClassExpression => walker.visit_class_expression(node),
        SyntaxKind::InterfaceDeclaration => walker.visit_interface_declaration(node),
        SyntaxKind::TypeAliasDeclaration => walker.visit_type_alias_declaration(node),
        SyntaxKind::EnumDeclaration => walker.visit_enum_declaration(node),
        SyntaxKind::ModuleDeclaration => walker.visit_module_declaration(node),
        SyntaxKind::FunctionDeclaration => walker.visit_function_declaration(node),
        SyntaxKind::FunctionExpression => walker.visit_function_expression(node),
        SyntaxKind::ArrowFunction => walker.visit_arrow_function(node),
        SyntaxKind::MethodDeclaration => walker.visit_method_declaration(node),
        SyntaxKind::MethodSignature => walker.visit_method_signature(node),
        SyntaxKind::Constructor => walker.visit_constructor(node),
        SyntaxKind::GetAccessor => walker.visit_get_accessor(node),
        SyntaxKind::SetAccessor => walker.visit_set_accessor(node),
        SyntaxKind::CallSignature => walker.visit_call_signature(node),
        SyntaxKind::ConstructSignature => walker.visit_construct_signature(node),
        SyntaxKind::IndexSignature => walker.visit_index_signature(node),
        SyntaxKind::ParameterList => walker.visit_parameter_list(node),
        SyntaxKind::Parameter => walker.visit_parameter(node),
        SyntaxKind::PropertyDeclaration => walker.visit_property_declaration(node),
        SyntaxKind::PropertySignature => walker.visit_property_signature(node),
        SyntaxKind::VariableDeclarationList => walker.visit_variable_declaration_list(node),
        SyntaxKind::VariableDeclaration => walker.visit_variable_declaration(node),
        SyntaxKind::ObjectLiteralExpression => walker.visit_object_literal_expression(node),
        SyntaxKind::PropertyAssignment => walker.visit_property_assignment(node),
        SyntaxKind::ShorthandPropertyAssignment => {
            walker.visit_shorthand_property_assignment(node)
        }
        SyntaxKind::SpreadAssignment => walker.visit_spread_assignment(node),
        SyntaxKind::TypeLiteral => walker.visit_type_literal(node),
        SyntaxKind::Block => walker.visit_block(node),
        SyntaxKind::ForStatement => walker.visit_for_statement(node),
        SyntaxKind::ForInStatement => walker.visit_for_in_statement(node),
        SyntaxKind::ForOfStatement => walker.visit_for_of_statement(node),
        SyntaxKind::TryStatement => walker.visit_try_statement(node),
        SyntaxKind::CatchClause => walker.visit_catch_clause(node),
        SyntaxKind::Identifier
        | SyntaxKind::PrivateIdentifier
        | SyntaxKind::StringLiteral
        | SyntaxKind::NumericLiteral
        | SyntaxKind::BooleanLiteral
        | SyntaxKind::NullLiteral
        | SyntaxKind::ComputedPropertyName
        | SyntaxKind::TypeReference
        | SyntaxKind::PredefinedType
        | SyntaxKind::LiteralType
        | SyntaxKind::Unknown => WalkAction::Continue,
    }
}
