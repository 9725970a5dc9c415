//! Lowering from the tree-sitter concrete syntax tree into the typewalk
//! node model.
//!
//! Only named, non-extra nodes are kept. Type annotations are unwrapped so a
//! declaration's `Type` child is the annotated type itself, and a few shapes
//! are synthesized where tree-sitter is flatter than the TypeScript compiler:
//!
//! - `for (const k in o)` gets a variable declaration list holding one
//!   variable declaration named `k`.
//! - `catch (e: unknown)` gets a variable declaration for `e`.
//! - `x => x` gets a parameter list with one parameter.
//!
//! Comments are extras and never become nodes; their ranges are returned
//! alongside the tree.

use tree_sitter::{Node as TsNode, Tree};
use typewalk_core::{Field, NodeId, SyntaxKind, SyntaxTree, SyntaxTreeBuilder, TextRange};

/// Result of lowering one parse tree.
pub(crate) struct Lowered {
    pub(crate) tree: SyntaxTree,
    pub(crate) syntax_errors: Vec<TextRange>,
    pub(crate) comments: Vec<TextRange>,
}

/// Lowers `tree`, parsed from `src`, into a [`SyntaxTree`].
pub(crate) fn lower(tree: &Tree, src: &[u8]) -> Lowered {
    let root = tree.root_node();
    let mut lowering = Lowering {
        src,
        builder: SyntaxTreeBuilder::new(SyntaxKind::SourceFile, range_of(root)),
    };
    let root_id = lowering.builder.root();
    lowering.lower_children(root, root_id);

    Lowered {
        tree: lowering.builder.finish(),
        syntax_errors: collect_syntax_errors(root),
        comments: collect_comments(root),
    }
}

struct Lowering<'s> {
    src: &'s [u8],
    builder: SyntaxTreeBuilder,
}

impl Lowering<'_> {
    fn lower_children(&mut self, node: TsNode<'_>, parent: NodeId) {
        for (child, field_name) in named_children(node) {
            self.lower_child(node, child, field_name, parent);
        }
    }

    fn lower_child(
        &mut self,
        owner: TsNode<'_>,
        child: TsNode<'_>,
        field_name: Option<&'static str>,
        parent: NodeId,
    ) {
        match (owner.kind(), field_name) {
            ("arrow_function", Some("parameter")) => {
                self.lower_lone_parameter(child, parent);
                return;
            }
            ("catch_clause", Some("parameter")) => {
                self.lower_catch_binding(owner, child, parent);
                return;
            }
            // Lowered together with the catch binding.
            ("catch_clause", Some("type")) => return,
            ("for_in_statement", Some("left")) => {
                if let Some(keyword) = owner.child_by_field_name("kind") {
                    self.lower_loop_binding(keyword, child, parent);
                    return;
                }
            }
            _ => {}
        }

        self.lower_field(child, field_name.and_then(map_field), parent);
    }

    /// Lowers `node` in the role `field`, unwrapping annotation and rest
    /// wrappers so the role lands on the node rules care about.
    fn lower_field(&mut self, node: TsNode<'_>, field: Option<Field>, parent: NodeId) {
        let target = match field {
            Some(Field::Type) if node.kind().ends_with("_annotation") => first_named_child(node),
            Some(Field::Name) if node.kind() == "rest_pattern" => {
                first_named_child(node).filter(|inner| inner.kind() == "identifier")
            }
            _ => None,
        };

        self.lower_node(target.unwrap_or(node), field, parent);
    }

    fn lower_node(&mut self, node: TsNode<'_>, field: Option<Field>, parent: NodeId) -> NodeId {
        let kind = self.kind_of(node, field);
        let id = self.builder.add_child(parent, kind, field, range_of(node));
        self.lower_children(node, id);
        id
    }

    fn lower_lone_parameter(&mut self, name: TsNode<'_>, parent: NodeId) {
        let range = range_of(name);
        let list = self.builder.add_child(
            parent,
            SyntaxKind::ParameterList,
            Some(Field::Parameters),
            range,
        );
        let parameter = self
            .builder
            .add_child(list, SyntaxKind::Parameter, None, range);
        self.lower_node(name, Some(Field::Name), parameter);
    }

    fn lower_catch_binding(&mut self, clause: TsNode<'_>, binding: TsNode<'_>, parent: NodeId) {
        let annotation = clause.child_by_field_name("type");
        let end = annotation.map_or(binding.end_byte(), |a| a.end_byte());

        let declaration = self.builder.add_child(
            parent,
            SyntaxKind::VariableDeclaration,
            None,
            TextRange::new(binding.start_byte(), end),
        );
        self.lower_node(binding, Some(Field::Name), declaration);
        if let Some(annotation) = annotation {
            self.lower_field(annotation, Some(Field::Type), declaration);
        }
    }

    fn lower_loop_binding(&mut self, keyword: TsNode<'_>, binding: TsNode<'_>, parent: NodeId) {
        let list = self.builder.add_child(
            parent,
            SyntaxKind::VariableDeclarationList,
            None,
            TextRange::new(keyword.start_byte(), binding.end_byte()),
        );
        let declaration = self.builder.add_child(
            list,
            SyntaxKind::VariableDeclaration,
            None,
            range_of(binding),
        );
        self.lower_node(binding, Some(Field::Name), declaration);
    }

    fn kind_of(&self, node: TsNode<'_>, field: Option<Field>) -> SyntaxKind {
        let is_name = field == Some(Field::Name);

        match node.kind() {
            "program" => SyntaxKind::SourceFile,

            "identifier"
            | "property_identifier"
            | "shorthand_property_identifier_pattern"
            | "statement_identifier" => SyntaxKind::Identifier,
            "type_identifier" | "this" if is_name => SyntaxKind::Identifier,
            "private_property_identifier" => SyntaxKind::PrivateIdentifier,
            "string" => SyntaxKind::StringLiteral,
            "number" => SyntaxKind::NumericLiteral,
            "true" | "false" => SyntaxKind::BooleanLiteral,
            "null" => SyntaxKind::NullLiteral,
            "computed_property_name" => SyntaxKind::ComputedPropertyName,

            "class_declaration" | "abstract_class_declaration" => SyntaxKind::ClassDeclaration,
            "class" => SyntaxKind::ClassExpression,
            "interface_declaration" => SyntaxKind::InterfaceDeclaration,
            "type_alias_declaration" => SyntaxKind::TypeAliasDeclaration,
            "enum_declaration" => SyntaxKind::EnumDeclaration,
            "internal_module" | "module" => SyntaxKind::ModuleDeclaration,

            "function_declaration" | "generator_function_declaration" | "function_signature" => {
                SyntaxKind::FunctionDeclaration
            }
            "function_expression" | "function" | "generator_function" => {
                SyntaxKind::FunctionExpression
            }
            "arrow_function" => SyntaxKind::ArrowFunction,
            "method_definition" | "abstract_method_signature" => {
                self.method_kind(node, SyntaxKind::MethodDeclaration)
            }
            "method_signature" if parent_kind(node) == Some("class_body") => {
                self.method_kind(node, SyntaxKind::MethodDeclaration)
            }
            "method_signature" => self.method_kind(node, SyntaxKind::MethodSignature),
            "call_signature" => SyntaxKind::CallSignature,
            "construct_signature" => SyntaxKind::ConstructSignature,
            "index_signature" => SyntaxKind::IndexSignature,

            "formal_parameters" => SyntaxKind::ParameterList,
            "required_parameter" | "optional_parameter" => SyntaxKind::Parameter,
            "public_field_definition" => SyntaxKind::PropertyDeclaration,
            "property_signature" => SyntaxKind::PropertySignature,
            "lexical_declaration" | "variable_declaration" => SyntaxKind::VariableDeclarationList,
            "variable_declarator" => SyntaxKind::VariableDeclaration,

            "object" => SyntaxKind::ObjectLiteralExpression,
            "pair" => SyntaxKind::PropertyAssignment,
            "shorthand_property_identifier" => SyntaxKind::ShorthandPropertyAssignment,
            "spread_element" if parent_kind(node) == Some("object") => SyntaxKind::SpreadAssignment,

            "statement_block" => SyntaxKind::Block,
            "for_statement" => SyntaxKind::ForStatement,
            "for_in_statement" => match node.child_by_field_name("operator").map(|op| op.kind()) {
                Some("of") => SyntaxKind::ForOfStatement,
                _ => SyntaxKind::ForInStatement,
            },
            "try_statement" => SyntaxKind::TryStatement,
            "catch_clause" => SyntaxKind::CatchClause,

            "binary_expression" | "assignment_expression" | "augmented_assignment_expression" => {
                SyntaxKind::BinaryExpression
            }
            "call_expression" => SyntaxKind::CallExpression,

            "type_identifier" | "generic_type" | "nested_type_identifier" => {
                SyntaxKind::TypeReference
            }
            "predefined_type" => SyntaxKind::PredefinedType,
            "literal_type" => SyntaxKind::LiteralType,
            "object_type" | "interface_body" => SyntaxKind::TypeLiteral,

            _ => SyntaxKind::Unknown,
        }
    }

    /// Distinguishes accessors and class constructors from plain methods.
    fn method_kind(&self, node: TsNode<'_>, plain: SyntaxKind) -> SyntaxKind {
        let mut cursor = node.walk();
        if cursor.goto_first_child() {
            loop {
                if cursor.field_name() == Some("name") {
                    break;
                }
                let child = cursor.node();
                if !child.is_named() {
                    match child.kind() {
                        "get" => return SyntaxKind::GetAccessor,
                        "set" => return SyntaxKind::SetAccessor,
                        _ => {}
                    }
                }
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
        }

        let is_constructor = parent_kind(node) == Some("class_body")
            && node.child_by_field_name("name").is_some_and(|name| {
                name.kind() == "property_identifier"
                    && name.utf8_text(self.src).is_ok_and(|text| text == "constructor")
            });

        if is_constructor {
            SyntaxKind::Constructor
        } else {
            plain
        }
    }
}

fn map_field(name: &str) -> Option<Field> {
    match name {
        "name" | "key" | "pattern" => Some(Field::Name),
        "type" | "return_type" => Some(Field::Type),
        "parameters" => Some(Field::Parameters),
        "value" => Some(Field::Initializer),
        "body" => Some(Field::Body),
        _ => None,
    }
}

/// Named, non-extra children of `node` with the field each one fills.
fn named_children(node: TsNode<'_>) -> Vec<(TsNode<'_>, Option<&'static str>)> {
    let mut children = Vec::with_capacity(node.named_child_count());
    let mut cursor = node.walk();
    if cursor.goto_first_child() {
        loop {
            let child = cursor.node();
            if child.is_named() && !child.is_extra() {
                children.push((child, cursor.field_name()));
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }
    children
}

fn first_named_child(node: TsNode<'_>) -> Option<TsNode<'_>> {
    named_children(node).into_iter().map(|(child, _)| child).next()
}

fn parent_kind(node: TsNode<'_>) -> Option<&'static str> {
    node.parent().map(|parent| parent.kind())
}

fn range_of(node: TsNode<'_>) -> TextRange {
    TextRange::new(node.start_byte(), node.end_byte())
}

/// Ranges of `ERROR` and missing nodes, in source order.
fn collect_syntax_errors(root: TsNode<'_>) -> Vec<TextRange> {
    let mut errors = Vec::new();
    if !root.has_error() {
        return errors;
    }

    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        let descend = if node.is_error() || node.is_missing() {
            errors.push(range_of(node));
            false
        } else {
            node.has_error()
        };

        if descend && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return errors;
            }
        }
    }
}

/// Ranges of every `comment` node, in source order.
fn collect_comments(root: TsNode<'_>) -> Vec<TextRange> {
    let mut comments = Vec::new();
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.kind() == "comment" {
            comments.push(range_of(node));
        } else if cursor.goto_first_child() {
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return comments;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::{Language, Parser};

    fn parse(src: &str) -> Lowered {
        let language: Language = tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .expect("typescript grammar should load");
        let tree = parser.parse(src, None).expect("parser should produce a tree");
        lower(&tree, src.as_bytes())
    }

    fn kinds(src: &str) -> Vec<SyntaxKind> {
        let lowered = parse(src);
        let file = typewalk_core::SourceFile::new("t.ts", src, lowered.tree);
        let mut kinds = Vec::new();
        let mut stack = vec![file.root()];
        while let Some(node) = stack.pop() {
            kinds.push(node.kind());
            stack.extend(node.children().rev());
        }
        kinds
    }

    #[test]
    fn maps_field_names() {
        assert_eq!(map_field("return_type"), Some(Field::Type));
        assert_eq!(map_field("pattern"), Some(Field::Name));
        assert_eq!(map_field("value"), Some(Field::Initializer));
        assert_eq!(map_field("operator"), None);
    }

    #[test]
    fn unwraps_type_annotations() {
        assert_eq!(
            kinds("let x: number;"),
            vec![
                SyntaxKind::SourceFile,
                SyntaxKind::VariableDeclarationList,
                SyntaxKind::VariableDeclaration,
                SyntaxKind::Identifier,
                SyntaxKind::PredefinedType,
            ]
        );
    }

    #[test]
    fn clean_source_has_no_syntax_errors() {
        assert!(parse("const a: string = 'a';").syntax_errors.is_empty());
    }

    #[test]
    fn records_comment_ranges() {
        let src = "let u = \"http://x\"; // trailing\n/* block */ let s = \"// not a comment\";\n";
        let lowered = parse(src);
        let comments: Vec<&str> = lowered
            .comments
            .iter()
            .map(|range| &src[range.start..range.end])
            .collect();
        assert_eq!(comments, vec!["// trailing", "/* block */"]);
    }

    #[test]
    fn records_syntax_errors() {
        let lowered = parse("function f( {");
        assert!(!lowered.syntax_errors.is_empty());
    }
}
