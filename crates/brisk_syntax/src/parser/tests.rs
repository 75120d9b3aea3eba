#[cfg(test)]
/// Parser unit tests.
///
/// These tests cover each production and the fail-fast error behaviour: the first malformed construct is the
/// one reported.
mod tests {
    use super::*;
    use crate::diagnostics::ErrorKind;
    use crate::lexer;

    fn parse_str(source: &str) -> Result<Ast, CompileError> {
        let tokens = lexer::lex(source)?;
        parse(&tokens)
    }

    fn parse_one(source: &str) -> Node {
        let ast = parse_str(source).unwrap();
        assert_eq!(ast.statements().len(), 1, "expected one statement in {source:?}");
        ast.statements()[0].clone()
    }

    fn expr_str(source: &str) -> Result<Node, CompileError> {
        let tokens = lexer::lex(source)?;
        parse_expression(&tokens)
    }

    fn ident(node: &Node) -> String {
        match &node.kind {
            NodeKind::Identifier(path) => path.to_string(),
            other => panic!("expected identifier, got {other:?}"),
        }
    }

    // ---- expressions -------------------------------------------------------

    #[test]
    fn test_constant_folding_precedence() {
        let node = expr_str("2 + 3 * 4").unwrap();
        assert_eq!(node.kind, NodeKind::Literal(Literal::Int(14)));
        assert!(!fold::is_reducible(&node));
    }

    #[test]
    fn test_additive_binds_tighter_than_equality() {
        assert_eq!(expr_str("1 + 2 == 3").unwrap().kind, NodeKind::Literal(Literal::Bool(true)));

        let node = expr_str("a + b == c").unwrap();
        let NodeKind::BinaryOperator { op, left, right } = &node.kind else {
            panic!("expected '==' at the root, got {:?}", node.kind);
        };
        assert_eq!(*op, OperatorId::EqEq);
        assert!(matches!(left.kind, NodeKind::BinaryOperator { op: OperatorId::Plus, .. }));
        assert_eq!(ident(right), "c");
    }

    #[test]
    fn test_assignment_is_right_associative() {
        let node = expr_str("a = b += 1").unwrap();
        let NodeKind::BinaryOperator { op, left, right } = &node.kind else {
            panic!("expected assignment, got {:?}", node.kind);
        };
        assert_eq!(*op, OperatorId::Eq);
        assert_eq!(ident(left), "a");
        assert!(matches!(right.kind, NodeKind::BinaryOperator { op: OperatorId::PlusEq, .. }));
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        assert_eq!(expr_str("10 - 4 - 3").unwrap().kind, NodeKind::Literal(Literal::Int(3)));
        assert_eq!(expr_str("2 ** 3 ** 2").unwrap().kind, NodeKind::Literal(Literal::Int(64)));
    }

    #[test]
    fn test_power_shares_the_multiplicative_band() {
        assert_eq!(expr_str("2 * 3 ** 2").unwrap().kind, NodeKind::Literal(Literal::Int(36)));
        assert_eq!(expr_str("12 / 2 ** 2").unwrap().kind, NodeKind::Literal(Literal::Int(36)));
    }

    #[test]
    fn test_unary_minus_binds_at_the_additive_band() {
        assert_eq!(expr_str("-2 ** 2").unwrap().kind, NodeKind::Literal(Literal::Int(-4)));
        assert_eq!(expr_str("-2 + 5").unwrap().kind, NodeKind::Literal(Literal::Int(3)));

        let node = expr_str("-x * 2").unwrap();
        let NodeKind::UnaryOperator { op, operand } = &node.kind else {
            panic!("expected '-' at the root, got {:?}", node.kind);
        };
        assert_eq!(*op, OperatorId::Minus);
        assert!(matches!(operand.kind, NodeKind::BinaryOperator { op: OperatorId::Star, .. }));
    }

    #[test]
    fn test_logical_and_binds_tighter_than_equality() {
        let node = expr_str("a == b && c").unwrap();
        let NodeKind::BinaryOperator { op, left, right } = &node.kind else {
            panic!("expected '==' at the root, got {:?}", node.kind);
        };
        assert_eq!(*op, OperatorId::EqEq);
        assert_eq!(ident(left), "a");
        assert!(matches!(right.kind, NodeKind::BinaryOperator { op: OperatorId::AmpAmp, .. }));
    }

    #[test]
    fn test_comparison_chains_to_the_left() {
        let node = expr_str("a < b < c").unwrap();
        let NodeKind::BinaryOperator { op, left, right } = &node.kind else {
            panic!("expected '<' at the root, got {:?}", node.kind);
        };
        assert_eq!(*op, OperatorId::Lt);
        assert!(matches!(left.kind, NodeKind::BinaryOperator { op: OperatorId::Lt, .. }));
        assert_eq!(ident(right), "c");
    }

    #[test]
    fn test_prefix_operators() {
        assert_eq!(expr_str("-(2 + 3)").unwrap().kind, NodeKind::Literal(Literal::Int(-5)));
        assert_eq!(expr_str("!true").unwrap().kind, NodeKind::Literal(Literal::Bool(false)));
        assert_eq!(expr_str("~0").unwrap().kind, NodeKind::Literal(Literal::Int(-1)));
        let node = expr_str("-x + 2").unwrap();
        let NodeKind::BinaryOperator { op, left, .. } = &node.kind else {
            panic!("expected '+', got {:?}", node.kind);
        };
        assert_eq!(*op, OperatorId::Plus);
        assert!(matches!(left.kind, NodeKind::UnaryOperator { op: OperatorId::Minus, .. }));
    }

    #[test]
    fn test_most_negative_integer_literal() {
        let min = expr_str("-9223372036854775808").unwrap();
        assert_eq!(min.kind, NodeKind::Literal(Literal::Int(i64::MIN)));
        assert_eq!(min.span, Span::new(0, 20));
        assert_eq!(expr_str("-0x8000000000000000").unwrap().kind, NodeKind::Literal(Literal::Int(i64::MIN)));

        let err = expr_str("9223372036854775808").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidOperation);
        let err = expr_str("-9223372036854775809").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_power_of_unit_base_ignores_exponent_width() {
        assert_eq!(expr_str("1 ** 5000000000").unwrap().kind, NodeKind::Literal(Literal::Int(1)));
        assert_eq!(expr_str("(-1) ** 5000000001").unwrap().kind, NodeKind::Literal(Literal::Int(-1)));
        let err = expr_str("2 ** 5000000000").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_qualified_call_with_nested_arguments() {
        let node = expr_str("io::print(f(1, 2), \"a\" + \"b\", [x, 3])").unwrap();
        let NodeKind::FunctionCall { callee, arguments } = &node.kind else {
            panic!("expected call, got {:?}", node.kind);
        };
        assert_eq!(callee.segments, vec!["io".to_string(), "print".to_string()]);
        assert_eq!(arguments.len(), 3);
        assert!(matches!(&arguments[0].kind, NodeKind::FunctionCall { arguments, .. } if arguments.len() == 2));
        assert_eq!(arguments[1].kind, NodeKind::Literal(Literal::String("ab".into())));
        assert!(matches!(&arguments[2].kind, NodeKind::ArrayLiteral(items) if items.len() == 2));
    }

    #[test]
    fn test_postfix_chain() {
        let node = expr_str("list.items[0].name(1)").unwrap();
        let NodeKind::MethodCall { receiver, method, arguments } = &node.kind else {
            panic!("expected method call, got {:?}", node.kind);
        };
        assert_eq!(method, "name");
        assert_eq!(arguments.len(), 1);
        assert!(matches!(receiver.kind, NodeKind::Index { .. }));
    }

    #[test]
    fn test_empty_argument_is_rejected() {
        let err = expr_str("f(1, , 2)").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
    }

    #[test]
    fn test_string_number_mix_is_semantic() {
        let err = expr_str("\"a\" + 1").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Semantic);
    }

    #[test]
    fn test_division_by_zero_literal() {
        let err = expr_str("1 / 0").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidOperation);
        assert_eq!(err.span, Span::new(0, 5));
    }

    // ---- declarations ------------------------------------------------------

    #[test]
    fn test_variable_declaration_folds_initializer() {
        let node = parse_one("let x: i32 = 2 + 3;");
        let decl = node.as_variable().unwrap();
        assert_eq!(decl.name, "x");
        assert_eq!(decl.ty, TypeRef::named("i32"));
        assert!(!decl.is_const);
        assert_eq!(
            decl.initializer.as_deref().and_then(Node::as_literal),
            Some(&Literal::Int(5))
        );
    }

    #[test]
    fn test_const_applies_to_every_name() {
        let ast = parse_str("const a: i32 = 1, b: Map<str, i32>, c: u8[];").unwrap();
        let decls: Vec<&VariableDecl> = ast.statements().iter().filter_map(Node::as_variable).collect();
        assert_eq!(decls.len(), 3);
        assert!(decls.iter().all(|d| d.is_const));
        assert_eq!(decls[1].ty.to_string(), "Map<str, i32>");
        assert!(decls[2].is_array());
    }

    #[test]
    fn test_nested_generic_arguments_close_with_shift_token() {
        let node = parse_one("let m: Map<str, List<i32>> = x;");
        let decl = node.as_variable().unwrap();
        assert_eq!(decl.ty.to_string(), "Map<str, List<i32>>");
        assert_eq!(decl.ty.arguments[1].arguments, vec![TypeRef::named("i32")]);

        let node = parse_one("let g: List<List<u8>>[] = y;");
        let decl = node.as_variable().unwrap();
        assert!(decl.ty.is_array);
        assert!(!decl.ty.arguments[0].is_array);
        assert_eq!(decl.ty.to_string(), "List<List<u8>>[]");
    }

    #[test]
    fn test_unbalanced_generic_arguments() {
        let err = parse_str("let m: Map<str, i32 = x;").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);

        let err = parse_str("let m: List<i32>> = x;").unwrap_err();
        assert_eq!(err.kind, ErrorKind::ImbalancedClosure);

        let err = parse_str("fn f(a: List<i32").unwrap_err();
        assert_eq!(err.kind, ErrorKind::ImbalancedClosure);
    }

    #[test]
    fn test_variable_requires_type() {
        let err = parse_str("var x = 1;").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert_eq!(err.message, "Expected ':' after variable name, found '='");
    }

    #[test]
    fn test_function_with_modifiers_and_return_type() {
        let node = parse_one("public async fn add(a: i32, b: i32) -> i32 { return a + b; }");
        let NodeKind::FunctionDeclaration(decl) = &node.kind else {
            panic!("expected function, got {:?}", node.kind);
        };
        assert_eq!(decl.name, "add");
        assert!(decl.modifiers.is_public && decl.modifiers.is_async && !decl.modifiers.is_external);
        assert_eq!(decl.parameters.len(), 2);
        assert_eq!(decl.return_type, Some(TypeRef::named("i32")));
        assert_eq!(decl.body.as_deref().and_then(Node::as_block).map(<[Node]>::len), Some(1));
    }

    #[test]
    fn test_external_function_has_no_body() {
        let node = parse_one("external fn puts(s: str);");
        let NodeKind::FunctionDeclaration(decl) = &node.kind else {
            panic!("expected function, got {:?}", node.kind);
        };
        assert!(decl.modifiers.is_external);
        assert!(decl.body.is_none());

        let err = parse_str("external fn puts(s: str) { }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
    }

    #[test]
    fn test_duplicate_modifier() {
        let err = parse_str("public public fn f() { }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Semantic);
        assert_eq!(err.span, Span::new(7, 13));
    }

    #[test]
    fn test_function_only_modifier_on_class() {
        let err = parse_str("async class A { }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Semantic);
    }

    #[test]
    fn test_variadic_last_is_accepted() {
        let node = parse_one("fn f(a: i32, b: i32...) { }");
        let NodeKind::FunctionDeclaration(decl) = &node.kind else {
            panic!("expected function, got {:?}", node.kind);
        };
        let b = decl.parameters[1].as_variable().unwrap();
        assert!(b.is_variadic && b.is_array());
        assert!(decl.is_variadic());
    }

    #[test]
    fn test_variadic_not_last_is_rejected() {
        let err = parse_str("fn f(a: i32, b: i32..., c: i32) { }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Semantic);
    }

    #[test]
    fn test_variadic_array_is_rejected() {
        let err = parse_str("fn f(b: i32[]...) { }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Semantic);
    }

    #[test]
    fn test_missing_parameter_paren_is_imbalanced() {
        let err = parse_str("fn f(a: i32 { }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::ImbalancedClosure);
        assert_eq!(err.span, Span::new(4, 5));
    }

    #[test]
    fn test_class_with_generics_and_parents() {
        let node = parse_one("public class Box<T, U> has Shape and io::Printable { fn area() -> f64 { return 0.0; } }");
        let NodeKind::ClassDeclaration(decl) = &node.kind else {
            panic!("expected class, got {:?}", node.kind);
        };
        assert!(decl.is_public);
        assert_eq!(decl.generics, vec!["T".to_string(), "U".to_string()]);
        assert_eq!(decl.parents.len(), 2);
        assert_eq!(decl.parents[1].to_string(), "io::Printable");
        assert_eq!(decl.body.as_block().map(<[Node]>::len), Some(1));
    }

    #[test]
    fn test_struct_fields() {
        let node = parse_one("struct Point { var x: f64; y: f64 = 1.0, const origin: bool; }");
        let NodeKind::StructureDeclaration(decl) = &node.kind else {
            panic!("expected struct, got {:?}", node.kind);
        };
        let names: Vec<&str> = decl
            .fields
            .iter()
            .filter_map(Node::as_variable)
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["x", "y", "origin"]);
        assert!(decl.fields[2].as_variable().is_some_and(|f| f.is_const));
    }

    #[test]
    fn test_enum_values() {
        let node = parse_one("enum Color { RED, GREEN = 5; BLUE, DARK_2 = -1, NEXT }");
        let NodeKind::EnumerableDeclaration(decl) = &node.kind else {
            panic!("expected enum, got {:?}", node.kind);
        };
        let values: Vec<(&str, i64)> = decl.members.iter().map(|m| (m.name.as_str(), m.value)).collect();
        assert_eq!(
            values,
            vec![("RED", 0), ("GREEN", 5), ("BLUE", 6), ("DARK_2", -1), ("NEXT", 0)]
        );
        assert_eq!(decl.value_of("BLUE"), Some(6));
    }

    #[test]
    fn test_enum_accepts_the_full_integer_range() {
        let node = parse_one("enum Edge { LOW = -9223372036854775808, HIGH = 9223372036854775807 }");
        let NodeKind::EnumerableDeclaration(decl) = &node.kind else {
            panic!("expected enum, got {:?}", node.kind);
        };
        assert_eq!(decl.value_of("LOW"), Some(i64::MIN));
        assert_eq!(decl.value_of("HIGH"), Some(i64::MAX));
    }

    #[test]
    fn test_enum_member_case() {
        let err = parse_str("enum Color { Red }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Semantic);
        assert!(err.message.contains("MACRO_CASE"));
    }

    #[test]
    fn test_module_and_import() {
        let ast = parse_str("import \"std/io\"; module math { fn one() -> i32 { return 1; } }").unwrap();
        assert_eq!(ast.statements()[0].kind, NodeKind::ImportStatement("std/io".into()));
        let NodeKind::ModuleDeclaration { name, body } = &ast.statements()[1].kind else {
            panic!("expected module");
        };
        assert_eq!(name, "math");
        assert_eq!(body.as_block().map(<[Node]>::len), Some(1));
    }

    // ---- statements --------------------------------------------------------

    #[test]
    fn test_if_else() {
        let node = parse_one("if (x > 0) { return x; } else { return 0; }");
        let NodeKind::ConditionalStatement {
            condition,
            then_block,
            else_branch,
        } = &node.kind
        else {
            panic!("expected conditional, got {:?}", node.kind);
        };
        assert!(matches!(condition.kind, NodeKind::BinaryOperator { op: OperatorId::Gt, .. }));
        let then_stmts = then_block.as_block().unwrap();
        assert!(matches!(then_stmts, [Node { kind: NodeKind::ReturnStatement(Some(_)), .. }]));
        let else_stmts = else_branch.as_deref().and_then(Node::as_block).unwrap();
        assert!(matches!(else_stmts, [Node { kind: NodeKind::ReturnStatement(Some(_)), .. }]));
    }

    #[test]
    fn test_else_if_nests() {
        let node = parse_one("if (a) { } else if (b) { } else { }");
        let NodeKind::ConditionalStatement { else_branch, .. } = &node.kind else {
            panic!("expected conditional");
        };
        let nested = else_branch.as_deref().unwrap();
        assert!(matches!(
            &nested.kind,
            NodeKind::ConditionalStatement { else_branch: Some(_), .. }
        ));
    }

    #[test]
    fn test_loops() {
        let ast = parse_str("while (i < 10) { i += 1; } do { i -= 1; } while (i > 0); for (;;) { break; }").unwrap();
        let kinds: Vec<&str> = ast.statements().iter().map(|n| n.kind.name()).collect();
        assert_eq!(kinds, vec!["WhileLoop", "DoWhileLoop", "ForLoop"]);
    }

    #[test]
    fn test_for_loop_header() {
        let node = parse_one("for (var i: i32 = 0, j: i32 = f(1, 2); i < j; i += 1) { continue; }");
        let NodeKind::ForLoop {
            initializer,
            condition,
            increment,
            ..
        } = &node.kind
        else {
            panic!("expected for loop");
        };
        assert!(matches!(
            initializer.as_deref().map(|n| &n.kind),
            Some(NodeKind::Block(decls)) if decls.len() == 2
        ));
        assert!(condition.is_some());
        assert!(matches!(
            increment.as_deref().map(|n| &n.kind),
            Some(NodeKind::BinaryOperator { op: OperatorId::PlusEq, .. })
        ));
    }

    #[test]
    fn test_switch() {
        let node = parse_one("switch (x) { case 1 -> { y = 1; } case -2 -> { } default -> { y = 0; } }");
        let NodeKind::SwitchStatement { cases, default, .. } = &node.kind else {
            panic!("expected switch");
        };
        let labels: Vec<&Literal> = cases.iter().map(|c| &c.value).collect();
        assert_eq!(labels, vec![&Literal::Int(1), &Literal::Int(-2)]);
        assert!(default.is_some());
    }

    #[test]
    fn test_switch_duplicate_default() {
        let err = parse_str("switch (x) { default -> { } default -> { } }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Semantic);
        assert!(err.message.contains("default"));
    }

    #[test]
    fn test_switch_case_must_be_constant() {
        let err = parse_str("switch (x) { case y -> { } }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Semantic);
    }

    #[test]
    fn test_try_catch() {
        let node = parse_one("try { risky(); } catch (e: Error) { throw e; }");
        let NodeKind::TryCatchStatement { binding, catch_block, .. } = &node.kind else {
            panic!("expected try/catch");
        };
        assert_eq!(binding.as_variable().map(|b| b.name.as_str()), Some("e"));
        assert!(matches!(
            catch_block.as_block(),
            Some([Node { kind: NodeKind::ThrowStatement(Some(_)), .. }])
        ));

        let err = parse_str("try { } catch (e: Error, f: Error) { }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Semantic);
    }

    #[test]
    fn test_stray_semicolons_and_comments() {
        let ast = parse_str(";; // nothing here\n/* or here */ return;").unwrap();
        assert!(matches!(ast.statements(), [Node { kind: NodeKind::ReturnStatement(None), .. }]));
    }

    #[test]
    fn test_unexpected_token() {
        let err = parse_str("let x: i32 = 1; else { }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert_eq!(err.message, "Unexpected 'else' where a statement was expected");
    }

    #[test]
    fn test_stray_closer_is_imbalanced() {
        let err = parse_str("fn f() { } }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::ImbalancedClosure);
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse_str("x = 1 y = 2;").unwrap_err();
        assert_eq!(err.message, "Expected ';' after expression, found identifier 'y'");
    }

    #[test]
    fn test_parent_links() {
        let ast = parse_str("fn f() { return g(1); }").unwrap();
        let call = ast
            .walk()
            .find(|n| matches!(n.kind, NodeKind::FunctionCall { .. }))
            .unwrap();
        let names: Vec<&str> = ast
            .ancestors(call.id)
            .filter_map(|id| ast.find(id))
            .map(|n| n.kind.name())
            .collect();
        assert_eq!(names, vec!["ReturnStatement", "Block", "FunctionDeclaration", "Block"]);
    }
}
