//! Integration test: TypeScript source lowered into the typewalk node model.

use std::path::Path;

use typewalk_core::{walk, Field, Node, SourceFile, SourceHost, SyntaxKind, SyntaxWalker};
use typewalk_ts::TypeScriptHost;

fn parse(src: &str) -> SourceFile {
    TypeScriptHost::new()
        .parse(Path::new("test.ts"), src)
        .expect("host should parse")
}

/// Every node of `kind`, in walk order.
fn find(file: &SourceFile, kind: SyntaxKind) -> Vec<Node<'_>> {
    struct Finder<'t> {
        kind: SyntaxKind,
        found: Vec<Node<'t>>,
    }

    impl<'t> SyntaxWalker<'t> for Finder<'t> {
        fn visit_node(&mut self, node: Node<'t>) {
            if node.kind() == self.kind {
                self.found.push(node);
            }
        }
    }

    let mut finder = Finder {
        kind,
        found: Vec::new(),
    };
    walk(&mut finder, file.root());
    finder.found
}

fn name_of(node: Node<'_>) -> &str {
    node.child_by_field(Field::Name).map_or("", Node::text)
}

// ── Declarations ──

#[test]
fn variable_declarations_with_and_without_types() {
    let file = parse("let a: string = 'x', b = 1;\nvar c;");
    let declarations = find(&file, SyntaxKind::VariableDeclaration);
    assert_eq!(declarations.len(), 3);

    let names: Vec<&str> = declarations.iter().map(|d| name_of(*d)).collect();
    assert_eq!(names, vec!["a", "b", "c"]);

    assert!(declarations[0].child_by_field(Field::Type).is_some());
    assert!(declarations[1].child_by_field(Field::Type).is_none());
    assert_eq!(
        declarations[1].child_by_field(Field::Initializer).map(Node::kind),
        Some(SyntaxKind::NumericLiteral)
    );

    for declaration in &declarations {
        assert_eq!(
            declaration.parent().map(Node::kind),
            Some(SyntaxKind::VariableDeclarationList)
        );
    }
}

#[test]
fn class_members() {
    let src = "class Point {\n  x: number;\n  y = 0;\n  #z;\n  constructor(x) {}\n  get len() { return 0; }\n  set len(v: number) {}\n  move(dx, dy): void {}\n}";
    let file = parse(src);

    let class = find(&file, SyntaxKind::ClassDeclaration)[0];
    assert_eq!(name_of(class), "Point");

    let properties = find(&file, SyntaxKind::PropertyDeclaration);
    assert_eq!(properties.len(), 3);
    assert!(properties[0].child_by_field(Field::Type).is_some());
    assert!(properties[1].child_by_field(Field::Type).is_none());
    assert_eq!(
        properties[2].child_by_field(Field::Name).map(Node::kind),
        Some(SyntaxKind::PrivateIdentifier)
    );

    assert_eq!(find(&file, SyntaxKind::Constructor).len(), 1);
    assert_eq!(find(&file, SyntaxKind::GetAccessor).len(), 1);
    assert_eq!(find(&file, SyntaxKind::SetAccessor).len(), 1);

    let methods = find(&file, SyntaxKind::MethodDeclaration);
    assert_eq!(methods.len(), 1);
    assert_eq!(name_of(methods[0]), "move");
    assert_eq!(
        methods[0].child_by_field(Field::Type).map(Node::text),
        Some("void")
    );
}

#[test]
fn method_named_get_is_not_an_accessor() {
    let file = parse("class A { get() {} set(v) {} }");
    assert_eq!(find(&file, SyntaxKind::MethodDeclaration).len(), 2);
    assert!(find(&file, SyntaxKind::GetAccessor).is_empty());
    assert!(find(&file, SyntaxKind::SetAccessor).is_empty());
}

#[test]
fn interface_members() {
    let src = "interface Shape {\n  name: string;\n  area;\n  scale(f: number): Shape;\n  (x: number): string;\n  new (): Shape;\n}";
    let file = parse(src);

    let interface = find(&file, SyntaxKind::InterfaceDeclaration)[0];
    assert_eq!(name_of(interface), "Shape");

    let properties = find(&file, SyntaxKind::PropertySignature);
    assert_eq!(properties.len(), 2);
    assert!(properties[1].child_by_field(Field::Type).is_none());

    assert_eq!(find(&file, SyntaxKind::MethodSignature).len(), 1);
    assert_eq!(find(&file, SyntaxKind::CallSignature).len(), 1);
    assert_eq!(find(&file, SyntaxKind::ConstructSignature).len(), 1);
}

// ── Parameters ──

#[test]
fn parameters_and_literal_types() {
    let file = parse("function f(kind: \"circle\", n?: number, ...rest) {}");
    let parameters = find(&file, SyntaxKind::Parameter);
    assert_eq!(parameters.len(), 3);

    let kind_type = parameters[0].child_by_field(Field::Type).unwrap();
    assert_eq!(kind_type.kind(), SyntaxKind::LiteralType);
    assert_eq!(
        kind_type.children().next().map(Node::kind),
        Some(SyntaxKind::StringLiteral)
    );

    assert_eq!(name_of(parameters[1]), "n");

    let rest = parameters[2].child_by_field(Field::Name).unwrap();
    assert_eq!(rest.kind(), SyntaxKind::Identifier);
    assert_eq!(rest.text(), "rest");
}

#[test]
fn arrow_function_lone_parameter() {
    let file = parse("const double = x => x * 2;");
    let arrow = find(&file, SyntaxKind::ArrowFunction)[0];

    let list = arrow.child_by_field(Field::Parameters).unwrap();
    assert_eq!(list.kind(), SyntaxKind::ParameterList);
    let parameter = list.children().next().unwrap();
    assert_eq!(parameter.kind(), SyntaxKind::Parameter);
    assert_eq!(name_of(parameter), "x");
}

// ── Loops and catch clauses ──

#[test]
fn for_in_and_for_of_bindings() {
    let file = parse("for (const k in o) {}\nfor (let v of xs) {}\nfor (k in o) {}");

    let for_in = find(&file, SyntaxKind::ForInStatement);
    assert_eq!(for_in.len(), 2);
    let for_of = find(&file, SyntaxKind::ForOfStatement);
    assert_eq!(for_of.len(), 1);

    let declarations = find(&file, SyntaxKind::VariableDeclaration);
    assert_eq!(declarations.len(), 2);

    let k = declarations[0];
    assert_eq!(name_of(k), "k");
    let grandparent = k.parent().and_then(Node::parent).unwrap();
    assert_eq!(grandparent.kind(), SyntaxKind::ForInStatement);

    let v = declarations[1];
    assert_eq!(name_of(v), "v");
    let grandparent = v.parent().and_then(Node::parent).unwrap();
    assert_eq!(grandparent.kind(), SyntaxKind::ForOfStatement);
}

#[test]
fn catch_clause_binding() {
    let file = parse("try { f(); } catch (e: unknown) { g(e); }");
    let declaration = find(&file, SyntaxKind::VariableDeclaration)[0];

    assert_eq!(name_of(declaration), "e");
    assert_eq!(declaration.text(), "e: unknown");
    assert_eq!(
        declaration.parent().map(Node::kind),
        Some(SyntaxKind::CatchClause)
    );
    assert_eq!(
        declaration.child_by_field(Field::Type).map(Node::kind),
        Some(SyntaxKind::PredefinedType)
    );
}

// ── Object literals ──

#[test]
fn object_literal_members() {
    let src = "const o = { a: 1, b() {}, get c() { return 1; }, set c(v) {}, d, ...e, f: () => 1 };";
    let file = parse(src);

    let object = find(&file, SyntaxKind::ObjectLiteralExpression)[0];
    let kinds: Vec<SyntaxKind> = object.children().map(Node::kind).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::PropertyAssignment,
            SyntaxKind::MethodDeclaration,
            SyntaxKind::GetAccessor,
            SyntaxKind::SetAccessor,
            SyntaxKind::ShorthandPropertyAssignment,
            SyntaxKind::SpreadAssignment,
            SyntaxKind::PropertyAssignment,
        ]
    );

    let last = object.children().last().unwrap();
    assert_eq!(name_of(last), "f");
    assert_eq!(
        last.child_by_field(Field::Initializer).map(Node::kind),
        Some(SyntaxKind::ArrowFunction)
    );
}

// ── Robustness ──

#[test]
fn syntax_errors_do_not_prevent_a_tree() {
    let file = parse("function broken( {\nlet ok: number = 1;");
    assert!(!file.syntax_errors().is_empty());
    assert_eq!(file.root().kind(), SyntaxKind::SourceFile);
}

#[test]
fn ranges_are_byte_offsets() {
    let src = "let é = 1;\nlet y;";
    let file = parse(src);
    let y = find(&file, SyntaxKind::VariableDeclaration)[1];
    let name = y.child_by_field(Field::Name).unwrap();

    assert_eq!(name.text(), "y");
    assert_eq!(&src[name.start()..name.end()], "y");
    let position = file.line_and_character(name.start());
    assert_eq!((position.line, position.character), (1, 4));
}
