//! Rule requiring explicit type annotations.
//!
//! Each syntactic category is checked only when its option is enabled:
//!
//! | Option | Checks |
//! |--------|--------|
//! | `call-signature` | return types of functions, methods, get accessors, call and construct signatures, and arrow functions assigned to object literal properties |
//! | `parameter` | parameter types, except string-literal tag types such as `kind: "circle"` |
//! | `member-variable-declaration` | class property types |
//! | `property-declaration` | interface and type literal property types |
//! | `variable-declaration` | variable types, except `for...in` and `catch` bindings |
//!
//! Set accessors and class constructors never have a return type and are not
//! checked under `call-signature`; their parameters still are.
//!
//! # Configuration
//!
//! ```toml
//! [rules.typedef]
//! options = ["call-signature", "parameter"]
//! ```
//!
//! # Suppression
//!
//! - `// typewalk: allow(typedef)` comment on the line of the failure, the
//!   line above it, or the line above the start of the flagged declaration

use typewalk_core::{
    apply_with_walker, walk, Failure, Field, Node, Rule, RuleOptions, RuleVisitor, RuleWalker,
    SourceFile, SyntaxKind, SyntaxWalker, WalkAction,
};

/// Rule name for typedef.
pub const NAME: &str = "typedef";

/// Failure string for typedef.
pub const FAILURE_STRING: &str = "missing type declaration";

/// Option enabling return type checks.
pub const CALL_SIGNATURE: &str = "call-signature";
/// Option enabling parameter type checks.
pub const PARAMETER: &str = "parameter";
/// Option enabling class property type checks.
pub const MEMBER_VARIABLE_DECLARATION: &str = "member-variable-declaration";
/// Option enabling interface property type checks.
pub const PROPERTY_DECLARATION: &str = "property-declaration";
/// Option enabling variable type checks.
pub const VARIABLE_DECLARATION: &str = "variable-declaration";

/// Every option this rule understands.
pub const OPTIONS: [&str; 5] = [
    CALL_SIGNATURE,
    PARAMETER,
    MEMBER_VARIABLE_DECLARATION,
    PROPERTY_DECLARATION,
    VARIABLE_DECLARATION,
];

/// Requires type annotations on the declarations selected by its options.
#[derive(Debug, Clone, Default)]
pub struct Typedef {
    options: RuleOptions,
}

impl Typedef {
    /// Creates the rule with the given options.
    #[must_use]
    pub fn new(options: RuleOptions) -> Self {
        Self { options }
    }

    /// Creates the rule with every option enabled.
    #[must_use]
    pub fn all() -> Self {
        Self::new(RuleOptions::from_flags(OPTIONS))
    }
}

impl Rule for Typedef {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires type definitions to exist"
    }

    fn failure_string(&self) -> &'static str {
        FAILURE_STRING
    }

    fn options(&self) -> &RuleOptions {
        &self.options
    }

    fn apply(&self, file: &SourceFile) -> Vec<Failure> {
        apply_with_walker(TypedefWalker {
            inner: RuleWalker::new(file, NAME, &self.options),
        })
    }
}

struct TypedefWalker<'t> {
    inner: RuleWalker<'t>,
}

impl<'t> TypedefWalker<'t> {
    fn handle_call_signature(&mut self, node: Node<'t>) {
        let name = node.child_by_field(Field::Name);
        let location = node
            .child_by_field(Field::Parameters)
            .or(name)
            .map_or(node.start(), Node::end);

        self.check_type_annotation(CALL_SIGNATURE, node, location, name);
    }

    /// Checks a declaration whose failure sits right after its name.
    fn handle_declaration(&mut self, option: &str, node: Node<'t>) {
        let name = node.child_by_field(Field::Name);
        let location = name.map_or(node.end(), Node::end);

        self.check_type_annotation(option, node, location, name);
    }

    fn check_type_annotation(
        &mut self,
        option: &str,
        node: Node<'t>,
        location: usize,
        name: Option<Node<'t>>,
    ) {
        if node.child_by_field(Field::Type).is_some() || !self.inner.has_option(option) {
            return;
        }

        let name_suffix = name
            .filter(|n| n.is_identifier())
            .map(|n| format!(": '{}'", n.text()))
            .unwrap_or_default();

        let failure = self.inner.create_node_failure(
            node,
            location,
            1,
            format!("expected {option}{name_suffix} to have a typedef"),
        );
        self.inner.add_failure(failure);
    }
}

fn is_string_literal_type(node: Node<'_>) -> bool {
    node.kind() == SyntaxKind::LiteralType
        && node
            .children()
            .next()
            .is_some_and(|literal| literal.kind() == SyntaxKind::StringLiteral)
}

impl<'t> SyntaxWalker<'t> for TypedefWalker<'t> {
    fn visit_function_declaration(&mut self, node: Node<'t>) -> WalkAction {
        self.handle_call_signature(node);
        WalkAction::Continue
    }

    fn visit_function_expression(&mut self, node: Node<'t>) -> WalkAction {
        self.handle_call_signature(node);
        WalkAction::Continue
    }

    fn visit_get_accessor(&mut self, node: Node<'t>) -> WalkAction {
        self.handle_call_signature(node);
        WalkAction::Continue
    }

    fn visit_method_declaration(&mut self, node: Node<'t>) -> WalkAction {
        self.handle_call_signature(node);
        WalkAction::Continue
    }

    fn visit_method_signature(&mut self, node: Node<'t>) -> WalkAction {
        self.handle_call_signature(node);
        WalkAction::Continue
    }

    fn visit_call_signature(&mut self, node: Node<'t>) -> WalkAction {
        self.handle_call_signature(node);
        WalkAction::Continue
    }

    fn visit_construct_signature(&mut self, node: Node<'t>) -> WalkAction {
        self.handle_call_signature(node);
        WalkAction::Continue
    }

    fn visit_object_literal_expression(&mut self, node: Node<'t>) -> WalkAction {
        for member in node.children() {
            match member.kind() {
                SyntaxKind::PropertyAssignment
                | SyntaxKind::MethodDeclaration
                | SyntaxKind::GetAccessor
                | SyntaxKind::SetAccessor => walk(self, member),
                _ => {}
            }
        }
        WalkAction::SkipChildren
    }

    fn visit_parameter(&mut self, node: Node<'t>) -> WalkAction {
        let declared = node.child_by_field(Field::Type);
        if !declared.is_some_and(is_string_literal_type) {
            self.handle_declaration(PARAMETER, node);
        }
        WalkAction::Continue
    }

    fn visit_property_assignment(&mut self, node: Node<'t>) -> WalkAction {
        if let Some(initializer) = node.child_by_field(Field::Initializer) {
            // Function expressions are checked by their own hook.
            if initializer.kind() == SyntaxKind::ArrowFunction {
                self.handle_call_signature(initializer);
            }
        }
        WalkAction::Continue
    }

    fn visit_property_declaration(&mut self, node: Node<'t>) -> WalkAction {
        self.handle_declaration(MEMBER_VARIABLE_DECLARATION, node);
        WalkAction::Continue
    }

    fn visit_property_signature(&mut self, node: Node<'t>) -> WalkAction {
        self.handle_declaration(PROPERTY_DECLARATION, node);
        WalkAction::Continue
    }

    fn visit_variable_declaration(&mut self, node: Node<'t>) -> WalkAction {
        let parent = node.parent();
        let in_for_in = parent
            .and_then(Node::parent)
            .is_some_and(|grandparent| grandparent.kind() == SyntaxKind::ForInStatement);
        let in_catch = parent.is_some_and(|p| p.kind() == SyntaxKind::CatchClause);

        if !in_for_in && !in_catch {
            self.handle_declaration(VARIABLE_DECLARATION, node);
        }
        WalkAction::Continue
    }
}

impl<'t> RuleVisitor<'t> for TypedefWalker<'t> {
    fn rule_walker(&self) -> &RuleWalker<'t> {
        &self.inner
    }

    fn into_rule_walker(self) -> RuleWalker<'t> {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use typewalk_core::SourceHost;
    use typewalk_ts::TypeScriptHost;

    fn check(src: &str, options: &[&str]) -> Vec<Failure> {
        let file = TypeScriptHost::new()
            .parse(Path::new("test.ts"), src)
            .expect("source should parse");
        Typedef::new(RuleOptions::from_flags(options.iter().copied())).apply(&file)
    }

    fn messages(failures: &[Failure]) -> Vec<&str> {
        failures.iter().map(|f| f.message.as_str()).collect()
    }

    #[test]
    fn test_function_missing_return_type() {
        let src = "function f(x: number) { return x; }";
        let failures = check(src, &[CALL_SIGNATURE]);

        assert_eq!(messages(&failures), vec!["expected call-signature: 'f' to have a typedef"]);
        assert_eq!(failures[0].start, 21);
        assert_eq!(failures[0].width, 1);
    }

    #[test]
    fn test_function_with_return_type() {
        let failures = check("function f(x: number): number { return x; }", &[CALL_SIGNATURE]);
        assert!(failures.is_empty());
    }

    #[test]
    fn test_no_options_no_failures() {
        let src = "function f(x) { let y = x; return y; }";
        assert!(check(src, &[]).is_empty());
    }

    #[test]
    fn test_unknown_option_is_inert() {
        assert!(check("let y = 1;", &["no-such-option"]).is_empty());
    }

    #[test]
    fn test_parameter_position_is_end_of_name() {
        let src = "function f(a, b: string) {}";
        let failures = check(src, &[PARAMETER]);

        assert_eq!(messages(&failures), vec!["expected parameter: 'a' to have a typedef"]);
        assert_eq!(failures[0].start, 12);
    }

    #[test]
    fn test_string_literal_parameter_exempt() {
        let failures = check("function f(kind: \"circle\", n: 1) {}", &[PARAMETER]);
        assert!(failures.is_empty());

        let failures = check("function f(kind: \"circle\", n) {}", &[PARAMETER]);
        assert_eq!(messages(&failures), vec!["expected parameter: 'n' to have a typedef"]);
    }

    #[test]
    fn test_set_accessor_and_constructor_skipped() {
        let src = "class A {\n  constructor(x) {}\n  set v(x) {}\n  get v() { return 1; }\n}";
        let failures = check(src, &[CALL_SIGNATURE]);
        assert_eq!(messages(&failures), vec!["expected call-signature: 'v' to have a typedef"]);

        let failures = check(src, &[PARAMETER]);
        assert_eq!(failures.len(), 2);
    }

    #[test]
    fn test_anonymous_function_has_no_name() {
        let failures = check("const f = function () {};", &[CALL_SIGNATURE]);
        assert_eq!(messages(&failures), vec!["expected call-signature to have a typedef"]);
    }

    #[test]
    fn test_destructured_parameter_has_no_name() {
        let failures = check("function f({ a, b }) {}", &[PARAMETER]);
        assert_eq!(messages(&failures), vec!["expected parameter to have a typedef"]);
    }

    #[test]
    fn test_false_option_is_disabled() {
        let file = TypeScriptHost::new()
            .parse(Path::new("test.ts"), "let y = 1;")
            .unwrap();
        let options = RuleOptions::new().with_value(VARIABLE_DECLARATION, toml::Value::Boolean(false));
        assert!(Typedef::new(options).apply(&file).is_empty());
    }

    #[test]
    fn test_all_enables_every_option() {
        let rule = Typedef::all();
        for option in OPTIONS {
            assert!(rule.options().has_option(option));
        }
    }
}
