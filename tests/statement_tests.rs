// Integration tests for statements, policies, and the trace recorder

use std::cell::RefCell;
use std::rc::Rc;

use crex::interpreter::engine::{Interpreter, UndefinedPolicy};
use crex::interpreter::errors::RuntimeError;
use crex::memory::{value::Value, Environment};
use crex::parser::ast::Program;
use crex::trace::{TraceEvent, TraceLog};

fn program(source: &str) -> Program {
    crex::parse(crex::tokenize(source).unwrap()).unwrap()
}

fn eval(source: &str) -> (Value, Environment) {
    crex::evaluate(&program(source), Environment::default()).unwrap()
}

#[test]
fn test_declaration_with_mixed_declarators() {
    let (value, env) = eval("int a = 10, b, c = a + 1;");
    assert_eq!(value, Value::Int(11));
    assert_eq!(env.get("a"), Some(&Value::Int(10)));
    assert_eq!(env.get("b"), Some(&Value::Int(0)));
    assert_eq!(env.get("c"), Some(&Value::Int(11)));
}

#[test]
fn test_bare_declarator_keeps_existing_binding() {
    let mut env = Environment::default();
    env.insert("a".to_string(), Value::Int(42));
    let (_, env) = crex::evaluate(&program("int a;"), env).unwrap();
    assert_eq!(env.get("a"), Some(&Value::Int(42)));
}

#[test]
fn test_declaration_with_initializer_overwrites() {
    let mut env = Environment::default();
    env.insert("a".to_string(), Value::Int(42));
    let (_, env) = crex::evaluate(&program("int a = 7;"), env).unwrap();
    assert_eq!(env.get("a"), Some(&Value::Int(7)));
}

#[test]
fn test_program_value_is_last_statement() {
    assert_eq!(eval("1 + 1; 2 + 2; 3 + 3;").0, Value::Int(6));
}

#[test]
fn test_empty_program_and_empty_statement() {
    assert_eq!(eval("").0, Value::Int(0));
    assert_eq!(eval(";").0, Value::Int(0));
    // A trailing empty statement resets the program value to 0.
    assert_eq!(eval("1 + 1;;").0, Value::Int(0));
}

#[test]
fn test_strict_mode_rejects_undefined_reads() {
    let err = crex::evaluate(&program("x + 1;"), Environment::default()).unwrap_err();
    match err {
        RuntimeError::UndefinedVariable { name, .. } => assert_eq!(name, "x"),
        other => panic!("expected undefined variable error, got {:?}", other),
    }
}

#[test]
fn test_permissive_mode_binds_zero() {
    let mut interpreter =
        Interpreter::with_env(Environment::default()).with_policy(UndefinedPolicy::Permissive);
    let value = interpreter.run(&program("x + 1;")).unwrap();
    assert_eq!(value, Value::Int(1));
    assert_eq!(interpreter.env().get("x"), Some(&Value::Int(0)));
}

#[test]
fn test_compound_assignment_defaults_to_zero_even_in_strict_mode() {
    let (value, env) = eval("x += 5;");
    assert_eq!(value, Value::Int(5));
    assert_eq!(env.get("x"), Some(&Value::Int(5)));
}

#[test]
fn test_subscript_assignment_round_trip() {
    let mut env = Environment::default();
    env.insert(
        "arr".to_string(),
        Value::array(vec![Value::Int(10), Value::Int(20), Value::Int(30)]),
    );
    env.insert("idx".to_string(), Value::Int(1));
    let (value, env) = crex::evaluate(&program("arr[idx] = 99; arr[1];"), env).unwrap();
    assert_eq!(value, Value::Int(99));

    // The container was mutated in place, so the seeded handle sees it too.
    if let Some(Value::Array(elements)) = env.get("arr") {
        assert_eq!(elements.borrow()[1], Value::Int(99));
    } else {
        panic!("arr is no longer an array");
    }
}

#[test]
fn test_compound_subscript_assignment() {
    let mut env = Environment::default();
    env.insert(
        "arr".to_string(),
        Value::array(vec![Value::Int(10), Value::Int(20)]),
    );
    let (value, _) = crex::evaluate(&program("arr[0] += 5; arr[0];"), env).unwrap();
    assert_eq!(value, Value::Int(15));
}

#[test]
fn test_array_aliasing_through_assignment() {
    let mut env = Environment::default();
    env.insert("arr".to_string(), Value::array(vec![Value::Int(1)]));
    let (value, _) = crex::evaluate(&program("alias = arr; alias[0] = 9; arr[0];"), env).unwrap();
    assert_eq!(value, Value::Int(9));
}

#[test]
fn test_subscript_errors() {
    let mut env = Environment::default();
    env.insert(
        "arr".to_string(),
        Value::array(vec![Value::Int(10), Value::Int(20)]),
    );
    env.insert("n".to_string(), Value::Int(5));

    let err = crex::evaluate(&program("arr[2];"), env.clone()).unwrap_err();
    assert!(matches!(err, RuntimeError::Subscript { .. }));

    let err = crex::evaluate(&program("arr[-1];"), env.clone()).unwrap_err();
    assert!(matches!(err, RuntimeError::Subscript { .. }));

    let err = crex::evaluate(&program("n[0];"), env).unwrap_err();
    assert!(matches!(err, RuntimeError::Subscript { .. }));
}

#[test]
fn test_trace_records_statements_and_writes() {
    let log = Rc::new(RefCell::new(TraceLog::new()));
    let mut interpreter = Interpreter::new();
    interpreter.set_tracer(Box::new(log.clone()));

    interpreter
        .run(&program("int a = 1; a += 2;"))
        .unwrap();

    let log = log.borrow();
    let events = log.events();
    assert_eq!(
        events,
        &[
            TraceEvent::Assignment {
                name: "a".to_string(),
                value: Value::Int(1),
            },
            TraceEvent::Statement {
                index: 0,
                value: Value::Int(1),
            },
            TraceEvent::Assignment {
                name: "a".to_string(),
                value: Value::Int(3),
            },
            TraceEvent::Statement {
                index: 1,
                value: Value::Int(3),
            },
        ]
    );
}

#[test]
fn test_declarations_and_expressions_interleave() {
    let (value, env) = eval("int a = 2; int b = a * 3; b - a;");
    assert_eq!(value, Value::Int(4));
    assert_eq!(env.len(), 2);
}
