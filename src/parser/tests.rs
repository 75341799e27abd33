//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Package clause and top-level declarations
//! - Function declarations and grouped parameters
//! - Expressions, precedence and calls
//! - Control flow, labels and nested functions
//! - Statement terminators and error cases

use crate::{
    ast::{
        ast::Program,
        expressions::Expr,
        statements::Stmt,
        types::TypeName,
    },
    errors::errors::{ErrorImpl, ErrorKind},
    lexer::lexer::Lexer,
};

use super::parser::{parse, parse_with_lexer};

fn parse_ok(source: &str) -> Program {
    parse(source, Some("test.go".to_string())).unwrap()
}

fn error_kind(source: &str) -> ErrorKind {
    parse(source, Some("test.go".to_string())).unwrap_err().kind()
}

/// Parses `expr` as the operand of a `return` and renders it back.
fn render_return(expr: &str) -> String {
    let source = format!("package main\nfunc main() int {{\nreturn {}\n}}\n", expr);
    let program = parse_ok(&source);

    match &program.block.functions[0].body.statements[0] {
        Stmt::Return(ret) => ret.value.to_string(),
        other => panic!("expected return statement, got {:?}", other),
    }
}

#[test]
fn test_parse_package_only() {
    let program = parse_ok("package main\n");

    assert_eq!(program.package, "main");
    assert!(program.block.var_decls.is_empty());
    assert!(program.block.functions.is_empty());
}

#[test]
fn test_parse_leading_newlines_and_missing_final_newline() {
    let program = parse_ok("\n\npackage main\nvar x int");

    assert_eq!(program.package, "main");
    assert_eq!(program.block.var_decls.len(), 1);
}

#[test]
fn test_parse_missing_package() {
    let error = parse("func main() {\n}\n", Some("test.go".to_string())).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::UnexpectedToken);
    assert_eq!(
        error.get_internal_error().to_string(),
        "Expected PACKAGE, but found FUNC"
    );
}

#[test]
fn test_parse_declarations_keep_source_order() {
    let program = parse_ok(
        "package main\nvar a int\nfunc f() {\n}\nvar b float\nfunc main() int {\nreturn 0\n}\n",
    );

    let vars: Vec<&str> = program.block.var_decls.iter().map(|v| v.ident.as_str()).collect();
    let funcs: Vec<&str> = program.block.functions.iter().map(|f| f.name.as_str()).collect();

    assert_eq!(vars, vec!["a", "b"]);
    assert_eq!(funcs, vec!["f", "main"]);
    assert_eq!(program.block.var_decls[1].var_type, TypeName::Float);
}

#[test]
fn test_parse_function_signature() {
    let program = parse_ok("package main\nfunc add(a, b int, c float) int {\nreturn a\n}\n");
    let function = &program.block.functions[0];

    let types: Vec<TypeName> = function.params.iter().map(|p| p.var_type).collect();
    assert_eq!(types, vec![TypeName::Int, TypeName::Int, TypeName::Float]);
    assert_eq!(function.return_type, Some(TypeName::Int));
    assert_eq!(function.signature(), "func add(a int, b int, c float) int");
}

#[test]
fn test_parse_function_without_return_type() {
    let program = parse_ok("package main\nfunc noop() {\n}\n");
    let function = &program.block.functions[0];

    assert!(function.params.is_empty());
    assert_eq!(function.return_type, None);
    assert!(function.body.is_empty());
    assert_eq!(function.signature(), "func noop()");
}

#[test]
fn test_parse_param_without_type() {
    let error = parse("package main\nfunc f(a) {\n}\n", Some("test.go".to_string())).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::UnexpectedToken);
    assert!(matches!(error.get_internal_error(), ErrorImpl::ExpectedType { .. }));
}

#[test]
fn test_parse_var_without_type() {
    let error = parse("package main\nvar x\n", Some("test.go".to_string())).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::SyntaxError);
    assert!(matches!(
        error.get_internal_error(),
        ErrorImpl::MissingVariableType { variable, .. } if variable == "x"
    ));
    assert_eq!(error.get_position().unwrap().line, 2);
}

#[test]
fn test_parse_precedence() {
    assert_eq!(render_return("1 + 2 * 3"), "(1 + (2 * 3))");
    assert_eq!(render_return("1 * 2 + 3"), "((1 * 2) + 3)");
    assert_eq!(render_return("8 / 4 / 2"), "((8 / 4) / 2)");
    assert_eq!(render_return("10 - 4 - 3"), "((10 - 4) - 3)");
}

#[test]
fn test_parse_grouping() {
    assert_eq!(render_return("(1 + 2) * 3"), "((1 + 2) * 3)");
    assert_eq!(render_return("((7))"), "7");
}

#[test]
fn test_parse_unary() {
    assert_eq!(render_return("-x + 1"), "(-x + 1)");
    assert_eq!(render_return("+2.5"), "+2.5");
    assert_eq!(render_return("-(1 + 2)"), "-(1 + 2)");
}

#[test]
fn test_parse_double_sign_is_rejected() {
    assert_eq!(
        error_kind("package main\nfunc main() int {\nreturn - -1\n}\n"),
        ErrorKind::UnexpectedToken
    );
}

#[test]
fn test_parse_empty_parentheses() {
    let error = parse(
        "package main\nfunc main() int {\nreturn ()\n}\n",
        Some("test.go".to_string()),
    )
    .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::SyntaxError);
    assert_eq!(error.get_internal_error(), &ErrorImpl::EmptyParentheses);
}

#[test]
fn test_parse_juxtaposed_operands() {
    assert_eq!(
        error_kind("package main\nfunc main() int {\nreturn (1 2)\n}\n"),
        ErrorKind::UnexpectedToken
    );
}

#[test]
fn test_parse_integer_overflow() {
    assert_eq!(
        error_kind("package main\nfunc main() int {\nreturn 9223372036854775808\n}\n"),
        ErrorKind::SyntaxError
    );
}

#[test]
fn test_parse_call_expression() {
    assert_eq!(render_return("add(1, 2 * 3)"), "add(1, (2 * 3))");
    assert_eq!(render_return("f()"), "f()");
    assert_eq!(render_return("f(g(1), x)"), "f(g(1), x)");
}

#[test]
fn test_parse_call_statement_and_assignment() {
    let program = parse_ok("package main\nfunc main() {\nx = 1 + 2\nprint(x, 3)\n}\n");
    let body = &program.block.functions[0].body.statements;

    match &body[0] {
        Stmt::Assign(assign) => {
            assert_eq!(assign.ident, "x");
            assert_eq!(assign.value.to_string(), "(1 + 2)");
        }
        other => panic!("expected assignment, got {:?}", other),
    }

    match &body[1] {
        Stmt::Call(call) => {
            assert_eq!(call.name, "print");
            assert_eq!(call.args.len(), 2);
        }
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_parse_call_ids_are_distinct() {
    let program = parse_ok("package main\nfunc main() int {\nf(1)\nreturn f(2) + g()\n}\n");
    let body = &program.block.functions[0].body.statements;

    let Stmt::Call(first) = &body[0] else {
        panic!("expected call statement");
    };
    let Stmt::Return(ret) = &body[1] else {
        panic!("expected return");
    };
    let Expr::Binary(binary) = &ret.value else {
        panic!("expected binary expression");
    };
    let (Expr::Call(second), Expr::Call(third)) = (&binary.left, &binary.right) else {
        panic!("expected calls on both sides");
    };

    assert_ne!(first.id, second.id);
    assert_ne!(second.id, third.id);
    assert_ne!(first.id, third.id);
}

#[test]
fn test_parse_if_and_for() {
    let program = parse_ok(
        "package main\nfunc main() {\nfor i < 10 {\ni = i + 1\n}\nif i >= 10 {\ni = 0\n}\n}\n",
    );
    let body = &program.block.functions[0].body.statements;

    match &body[0] {
        Stmt::For(for_stmt) => {
            assert_eq!(for_stmt.condition.to_string(), "i < 10");
            assert_eq!(for_stmt.body.len(), 1);
        }
        other => panic!("expected for, got {:?}", other),
    }

    match &body[1] {
        Stmt::If(if_stmt) => assert_eq!(if_stmt.condition.to_string(), "i >= 10"),
        other => panic!("expected if, got {:?}", other),
    }
}

#[test]
fn test_parse_condition_requires_comparison() {
    assert_eq!(
        error_kind("package main\nfunc main() {\nif x {\n}\n}\n"),
        ErrorKind::UnexpectedToken
    );
}

#[test]
fn test_parse_one_line_body() {
    let program = parse_ok("package main\nfunc main() int { return 1 }\n");

    assert_eq!(program.block.functions[0].body.len(), 1);
}

#[test]
fn test_parse_statements_need_separator() {
    let error = parse(
        "package main\nfunc main() {\nx = 1 y = 2\n}\n",
        Some("test.go".to_string()),
    )
    .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::UnexpectedToken);
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnexpectedToken {
            expected: "NEWLINE".to_string(),
            found: "y".to_string()
        }
    );
}

#[test]
fn test_parse_invalid_statement_start() {
    assert_eq!(
        error_kind("package main\nfunc main() {\n1\n}\n"),
        ErrorKind::SyntaxError
    );
    assert_eq!(
        error_kind("package main\nfunc main() {\nx + 1\n}\n"),
        ErrorKind::SyntaxError
    );
}

#[test]
fn test_parse_label_goto_and_nested_function() {
    let program = parse_ok(
        "package main\nfunc main() {\nlabel top\nfunc inner() {\n}\ngoto top\n}\n",
    );
    let body = &program.block.functions[0].body.statements;

    assert!(matches!(&body[0], Stmt::Label(label) if label.ident == "top"));
    assert!(matches!(&body[1], Stmt::FuncBlock(inner) if inner.name == "inner"));
    assert!(matches!(&body[2], Stmt::Goto(goto) if goto.ident == "top"));
}

#[test]
fn test_parse_local_var_declaration() {
    let program = parse_ok("package main\nfunc main() {\nvar n float\n}\n");

    assert!(matches!(
        &program.block.functions[0].body.statements[0],
        Stmt::VarDecl(var) if var.ident == "n" && var.var_type == TypeName::Float
    ));
}

#[test]
fn test_parse_unclosed_block() {
    assert_eq!(
        error_kind("package main\nfunc main() {\nx = 1\n"),
        ErrorKind::UnexpectedToken
    );
}

#[test]
fn test_parse_stray_top_level_statement() {
    assert_eq!(
        error_kind("package main\nx = 1\n"),
        ErrorKind::UnexpectedToken
    );
}

#[test]
fn test_parse_surfaces_lexer_errors() {
    assert_eq!(
        error_kind("package main\nvar x int @\n"),
        ErrorKind::IllegalChar
    );
}

#[test]
fn test_parse_program_display() {
    let program = parse_ok("package main\nvar total int\nfunc add(a, b int) int {\nreturn a + b\n}\n");

    assert_eq!(
        program.to_string(),
        "package main\nvar total int\nfunc add(a int, b int) int\n"
    );
}

#[test]
fn test_parse_with_lexer() {
    let source = "package main\nfunc main() int {\nreturn 1\n}\n";
    let program = parse_with_lexer(Lexer::new(source, Some("test.go".to_string()))).unwrap();

    assert_eq!(program, parse_ok(source));

    // lexing errors surface from the parser's pull
    let error = parse_with_lexer(Lexer::new("package main\nvar x @\n", None)).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::IllegalChar);
    assert_eq!(error.get_position().unwrap().line, 2);
}
