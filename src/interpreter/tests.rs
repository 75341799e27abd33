//! Unit tests for the interpreter module.
//!
//! This module contains tests for:
//! - Value arithmetic, promotion and comparisons
//! - Activation records and the call stack
//! - Statement execution, calls and runtime errors

use crate::{
    ast::{
        expressions::{BinOperator, CmpOp},
        types::TypeName,
    },
    config::Config,
    errors::errors::{Error, ErrorImpl, ErrorKind},
    parser::parser::parse,
    semantic_analyzer::semantic_analyzer::analyze,
};

use super::{
    call_stack::{ARType, ActivationRecord, CallStack},
    interpreter::Interpreter,
    value::Value,
};

fn run_with(source: &str, config: &Config) -> (Result<Option<Value>, Error>, String) {
    let program = parse(source, Some("test.go".to_string())).unwrap();
    let model = analyze(&program, config).unwrap();

    let mut output = Vec::new();
    let result = Interpreter::new(&program, &model, config, &mut output).interpret();

    (result, String::from_utf8(output).unwrap())
}

fn run(source: &str) -> Result<Option<Value>, Error> {
    run_with(source, &Config::default()).0
}

fn main_returning(body: &str) -> String {
    format!("package main\nfunc main() int {{\n{}\n}}\n", body)
}

#[test]
fn test_value_int_arithmetic() {
    assert_eq!(Value::Int(7).binary(BinOperator::Add, Value::Int(5)), Ok(Value::Int(12)));
    assert_eq!(Value::Int(7).binary(BinOperator::Sub, Value::Int(9)), Ok(Value::Int(-2)));
    assert_eq!(Value::Int(7).binary(BinOperator::Mul, Value::Int(3)), Ok(Value::Int(21)));
    assert_eq!(Value::Int(7).binary(BinOperator::Div, Value::Int(2)), Ok(Value::Int(3)));
    assert_eq!(Value::Int(-7).binary(BinOperator::Div, Value::Int(2)), Ok(Value::Int(-3)));
}

#[test]
fn test_value_int_arithmetic_wraps() {
    assert_eq!(
        Value::Int(i64::MAX).binary(BinOperator::Add, Value::Int(1)),
        Ok(Value::Int(i64::MIN))
    );
    assert_eq!(
        Value::Int(i64::MIN).binary(BinOperator::Div, Value::Int(-1)),
        Ok(Value::Int(i64::MIN))
    );
    assert_eq!(Value::Int(i64::MIN).negate(), Value::Int(i64::MIN));
}

#[test]
fn test_value_float_promotion() {
    assert_eq!(Value::Int(1).binary(BinOperator::Add, Value::Float(0.5)), Ok(Value::Float(1.5)));
    assert_eq!(Value::Float(5.0).binary(BinOperator::Div, Value::Int(2)), Ok(Value::Float(2.5)));
    assert_eq!(Value::Float(1.5).negate(), Value::Float(-1.5));
}

#[test]
fn test_value_division_by_zero() {
    assert_eq!(
        Value::Int(1).binary(BinOperator::Div, Value::Int(0)),
        Err(ErrorImpl::DivisionByZero)
    );
    assert_eq!(
        Value::Float(1.0).binary(BinOperator::Div, Value::Int(0)),
        Err(ErrorImpl::DivisionByZero)
    );
}

#[test]
fn test_value_compare() {
    assert!(Value::Int(1).compare(CmpOp::Lt, Value::Int(2)));
    assert!(Value::Int(2).compare(CmpOp::LtEq, Value::Int(2)));
    assert!(!Value::Int(2).compare(CmpOp::Gt, Value::Int(2)));
    assert!(Value::Int(2).compare(CmpOp::Eq, Value::Float(2.0)));
    assert!(Value::Float(2.5).compare(CmpOp::NotEq, Value::Int(2)));
    assert!(Value::Float(3.0).compare(CmpOp::GtEq, Value::Float(3.0)));
}

#[test]
fn test_value_display_and_zero() {
    assert_eq!(Value::Int(42).to_string(), "42");
    assert_eq!(Value::Float(3.0).to_string(), "3.0");
    assert_eq!(Value::Float(2.5).to_string(), "2.5");
    assert_eq!(Value::zero(TypeName::Int), Value::Int(0));
    assert_eq!(Value::zero(TypeName::Float), Value::Float(0.0));
}

#[test]
fn test_call_stack_push_pop() {
    let mut stack = CallStack::new();
    assert!(stack.is_empty());

    let mut program = ActivationRecord::new("main", ARType::Program, 1);
    program.set("x", Value::Int(1));
    stack.push(program);
    stack.push(ActivationRecord::new("f", ARType::Function, 2));

    assert_eq!(stack.len(), 2);
    assert_eq!(stack.function_depth(), 1);
    assert_eq!(stack.peek().unwrap().name, "f");
    assert_eq!(stack.peek().unwrap().get("x"), None);

    stack.peek_mut().unwrap().set("y", Value::Float(1.0));
    assert_eq!(stack.peek().unwrap().get("y"), Some(Value::Float(1.0)));

    let popped = stack.pop().unwrap();
    assert_eq!(popped.kind, ARType::Function);
    assert_eq!(stack.peek().unwrap().get("x"), Some(Value::Int(1)));
}

#[test]
fn test_call_stack_display() {
    let mut stack = CallStack::new();
    let mut record = ActivationRecord::new("main", ARType::Program, 1);
    record.set("b", Value::Int(2));
    record.set("a", Value::Float(1.0));
    stack.push(record);

    let rendered = stack.to_string();
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[0], "CALL STACK");
    assert_eq!(lines[2], "1: PROGRAM main");
    assert!(lines[3].starts_with("   a"));
    assert!(lines[3].ends_with(": 1.0"));
    assert!(lines[4].starts_with("   b"));
}

#[test]
fn test_interpret_writes_main_result() {
    let (result, output) = run_with(&main_returning("return 2 + 3 * 4"), &Config::default());

    assert_eq!(result.unwrap(), Some(Value::Int(14)));
    assert_eq!(output, "14\n");
}

#[test]
fn test_interpret_void_main_writes_nothing() {
    let (result, output) = run_with("package main\nfunc main() {\nx = 1\n}\n", &Config::default());

    assert_eq!(result.unwrap(), None);
    assert_eq!(output, "");
}

#[test]
fn test_interpret_missing_main() {
    let error = run("package main\nfunc helper() {\n}\n").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::IdNotFound);
    assert_eq!(error.get_internal_error().to_string(), "Function main can't found");
}

#[test]
fn test_interpret_float_result() {
    let (_, output) = run_with(&main_returning("return 1.5 * 2"), &Config::default());

    assert_eq!(output, "3.0\n");
}

#[test]
fn test_interpret_unary_and_grouping() {
    assert_eq!(run(&main_returning("return -(2 + 3) * +2")).unwrap(), Some(Value::Int(-10)));
}

#[test]
fn test_interpret_for_loop() {
    let source = main_returning("var i int\nfor i < 3 {\ni = i + 1\n}\nreturn i");

    assert_eq!(run(&source).unwrap(), Some(Value::Int(3)));
}

#[test]
fn test_interpret_return_unwinds_loop() {
    let source = main_returning("var i int\nfor i < 100 {\nif i == 7 {\nreturn i\n}\ni = i + 1\n}\nreturn 0");

    assert_eq!(run(&source).unwrap(), Some(Value::Int(7)));
}

#[test]
fn test_interpret_if_false_falls_through() {
    let source = main_returning("if 1 > 2 {\nreturn 1\n}\nreturn 2");

    assert_eq!(run(&source).unwrap(), Some(Value::Int(2)));
}

#[test]
fn test_interpret_call_binds_params() {
    let source = "package main\nfunc sub(a int, b int) int {\nreturn a - b\n}\nfunc main() int {\nreturn sub(10, 4)\n}\n";

    assert_eq!(run(source).unwrap(), Some(Value::Int(6)));
}

#[test]
fn test_interpret_recursion() {
    let source = "package main\nfunc sum(n int) int {\nif n == 0 {\nreturn 0\n}\nreturn n + sum(n - 1)\n}\nfunc main() int {\nreturn sum(3)\n}\n";

    assert_eq!(run(source).unwrap(), Some(Value::Int(6)));
}

#[test]
fn test_interpret_extra_arguments_are_dropped() {
    let source = "package main\nfunc first(a int) int {\nreturn a\n}\nfunc main() int {\nreturn first(9, 8, 7)\n}\n";

    assert_eq!(run(source).unwrap(), Some(Value::Int(9)));
}

#[test]
fn test_interpret_missing_argument_is_unbound() {
    let source = "package main\nfunc pair(a int, b int) int {\nreturn b\n}\nfunc main() int {\nreturn pair(1)\n}\n";
    let error = run(source).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::IdNotFound);
    assert!(matches!(
        error.get_internal_error(),
        ErrorImpl::VariableNotInFrame { variable, record } if variable == "b" && record == "pair"
    ));
}

#[test]
fn test_interpret_globals_are_not_visible_in_functions() {
    let source = "package main\nvar g int\nfunc main() int {\nreturn g\n}\n";
    let error = run(source).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::IdNotFound);
    assert_eq!(error.get_position().unwrap().line, 4);
}

#[test]
fn test_interpret_local_var_is_zeroed() {
    let source = main_returning("var n float\nreturn n + 1");

    assert_eq!(run(&source).unwrap(), Some(Value::Float(1.0)));
}

#[test]
fn test_interpret_unresolved_call() {
    let error = run("package main\nfunc main() {\nmissing(1)\n}\n").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::IdNotFound);
    assert_eq!(error.get_internal_error().to_string(), "Function missing can't found");
    let position = error.get_position().unwrap();
    assert_eq!((position.line, position.column), (3, 1));
}

#[test]
fn test_interpret_call_statement_value_ends_list() {
    let source = "package main\nfunc seven() int {\nreturn 7\n}\nfunc main() int {\nseven()\nreturn 1\n}\n";

    assert_eq!(run(source).unwrap(), Some(Value::Int(7)));
}

#[test]
fn test_interpret_void_call_as_operand() {
    let source = "package main\nfunc nothing() {\n}\nfunc main() int {\nreturn nothing() + 1\n}\n";
    let error = run(source).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::RuntimeError);
    assert!(matches!(error.get_internal_error(), ErrorImpl::MissingReturnValue { .. }));
}

#[test]
fn test_interpret_division_by_zero() {
    let error = run(&main_returning("var x int\nreturn 10 / x")).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::RuntimeError);
    assert_eq!(error.get_internal_error(), &ErrorImpl::DivisionByZero);
    let position = error.get_position().unwrap();
    assert_eq!((position.line, position.column), (4, 13));
}

#[test]
fn test_interpret_call_depth_limit() {
    let source = "package main\nfunc forever(n int) int {\nreturn forever(n + 1)\n}\nfunc main() int {\nreturn forever(0)\n}\n";
    let config = Config::default().with_max_call_depth(16);
    let (result, output) = run_with(source, &config);
    let error = result.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::RuntimeError);
    assert_eq!(error.get_internal_error(), &ErrorImpl::CallDepthExceeded { limit: 16 });
    assert_eq!(output, "");
}

/// `main` plus `calls + 1` nested activations of `count`.
fn countdown(calls: u32) -> String {
    format!(
        "package main\nfunc count(n int) int {{\nif n <= 0 {{\nreturn 0\n}}\nreturn 1 + count(n - 1)\n}}\nfunc main() int {{\nreturn count({})\n}}\n",
        calls
    )
}

#[test]
fn test_interpret_deep_recursion_within_default_limit() {
    // 1000 function records: main and 999 frames of count
    let (result, output) = run_with(&countdown(998), &Config::default());

    assert_eq!(result.unwrap(), Some(Value::Int(998)));
    assert_eq!(output, "998\n");
}

#[test]
fn test_interpret_default_call_depth_limit() {
    let (result, output) = run_with(&countdown(999), &Config::default());
    let error = result.unwrap_err();

    assert_eq!(error.get_internal_error(), &ErrorImpl::CallDepthExceeded { limit: 1000 });
    assert_eq!(error.get_position().unwrap().line, 6);
    assert_eq!(output, "");

    let (result, _) = run_with(&countdown(5000), &Config::default());
    assert_eq!(result.unwrap_err().get_internal_error(), &ErrorImpl::CallDepthExceeded { limit: 1000 });
}

#[test]
fn test_interpret_nested_function() {
    let source = "package main\nfunc main() int {\nfunc double(n int) int {\nreturn n * 2\n}\nreturn double(21)\n}\n";

    assert_eq!(run(source).unwrap(), Some(Value::Int(42)));
}

#[test]
fn test_interpret_label_and_goto_are_inert() {
    let source = main_returning("label top\ngoto top\nreturn 5");

    assert_eq!(run(&source).unwrap(), Some(Value::Int(5)));
}
