//! Integration tests for the Brisk front end
//!
//! These run whole source buffers through `parse_source` (lexer, parser, folding) and inspect the resulting tree or
//! the first diagnostic.

use brisk::ast::{Literal, Node, NodeKind, TypeRef};
use brisk::diagnostics::{format_error, line_col};
use brisk::{CompileError, ErrorKind, SourceFile, parse_source};
use brisk_core::lang::operators::OperatorId;

fn parse_err(source: &str) -> CompileError {
    match parse_source(source) {
        Ok(ast) => panic!("expected {source:?} to fail, got {:#?}", ast.root()),
        Err(err) => err,
    }
}

#[test]
fn test_folded_variable_declaration() {
    let ast = parse_source("let x: i32 = 2 + 3;").unwrap();
    assert!(matches!(ast.root().kind, NodeKind::Block(_)));
    assert_eq!(ast.statements().len(), 1);

    let decl = ast.statements()[0].as_variable().unwrap();
    assert_eq!(decl.name, "x");
    assert_eq!(decl.ty, TypeRef::named("i32"));
    assert!(!decl.is_const);
    assert_eq!(
        decl.initializer.as_deref().map(|n| &n.kind),
        Some(&NodeKind::Literal(Literal::Int(5)))
    );
}

#[test]
fn test_conditional_with_else() {
    let ast = parse_source("if (x > 0) { return x; } else { return 0; }").unwrap();
    let [stmt] = ast.statements() else {
        panic!("expected one statement");
    };
    let NodeKind::ConditionalStatement {
        condition,
        then_block,
        else_branch,
    } = &stmt.kind
    else {
        panic!("expected conditional, got {:?}", stmt.kind);
    };

    assert!(matches!(condition.kind, NodeKind::BinaryOperator { op: OperatorId::Gt, .. }));
    assert!(matches!(
        then_block.as_block(),
        Some([Node { kind: NodeKind::ReturnStatement(Some(_)), .. }])
    ));
    assert!(matches!(
        else_branch.as_deref().and_then(Node::as_block),
        Some([Node { kind: NodeKind::ReturnStatement(Some(_)), .. }])
    ));
}

#[test]
fn test_unclosed_parameter_list_aborts_with_location() {
    let source = "fn f(a: i32 { }";
    let err = parse_err(source);
    assert_eq!(err.kind, ErrorKind::ImbalancedClosure);
    assert_eq!(line_col(source, err.span.start), (1, 5));

    let rendered = format_error(&SourceFile::new("main.bk", source), &err);
    assert!(rendered.contains("imbalanced closure at main.bk:1:5"), "{rendered}");
}

#[test]
fn test_error_location_on_later_line() {
    let source = "let a: i32 = 1;\nlet b: i32 = 2;\n\nfn f() {\n    return a +;\n}\n";
    let err = parse_err(source);
    assert_eq!(err.kind, ErrorKind::Syntax);
    let (line, _) = line_col(source, err.span.start);
    assert_eq!(line, 5);
}

#[test]
fn test_illegal_character() {
    let err = parse_err("let x: i32 = 1 @ 2;");
    assert_eq!(err.kind, ErrorKind::IllegalCharacter);
    assert_eq!((err.span.start, err.span.end), (15, 16));
}

#[test]
fn test_whole_program() {
    let source = r#"
// geometry helpers
import "std/math";

enum Shape { CIRCLE, SQUARE = 4, TRIANGLE }

struct Point { x: f64; y: f64; }

public class Canvas<T> has Drawable {
    fn area(p: Point) -> f64 {
        return p.x * p.y;
    }
}

module util {
    const LIMIT: i32 = 1 << 4;

    fn clamp(v: i32, lo: i32, hi: i32) -> i32 {
        if (v < lo) { return lo; } else if (v > hi) { return hi; }
        return v;
    }
}

fn main(args: str...) {
    var total: i32 = 0;
    for (var i: i32 = 0; i < util::LIMIT; i += 1) {
        switch (i % 3) {
            case 0 -> { total += i; }
            default -> { continue; }
        }
    }
    while (total > 100) { total -= 1; }
    do { total = total * 2; } while (total < 10);
    try { log.write(total); } catch (e: Error) { throw e; }
}
"#;
    let ast = parse_source(source).unwrap();
    let kinds: Vec<&str> = ast.statements().iter().map(|n| n.kind.name()).collect();
    assert_eq!(
        kinds,
        vec![
            "ImportStatement",
            "EnumerableDeclaration",
            "StructureDeclaration",
            "ClassDeclaration",
            "ModuleDeclaration",
            "FunctionDeclaration",
        ]
    );

    let limit = ast
        .walk()
        .filter_map(Node::as_variable)
        .find(|decl| decl.name == "LIMIT")
        .unwrap();
    assert!(limit.is_const);
    assert_eq!(
        limit.initializer.as_deref().and_then(Node::as_literal),
        Some(&Literal::Int(16))
    );

    let NodeKind::FunctionDeclaration(main) = &ast.statements()[5].kind else {
        panic!("expected main");
    };
    assert!(main.is_variadic());

    // Every node except the root has a parent, and spans nest inside their parent's span.
    for node in ast.walk() {
        match ast.parent_of(node.id) {
            None => assert_eq!(node.id, ast.root().id),
            Some(parent) => {
                let parent = ast.find(parent).unwrap();
                assert!(parent.span.start <= node.span.start && node.span.end <= parent.span.end);
            }
        }
    }
}

#[test]
fn test_fail_fast_reports_first_error() {
    let err = parse_err("let a: i32 = 1 / 0;\nlet b = 2;");
    assert_eq!(err.kind, ErrorKind::InvalidOperation);
    assert!(err.message.contains("division by zero"), "{}", err.message);
}
