// Integration tests for expression evaluation

use crex::interpreter::errors::RuntimeError;
use crex::memory::{value::Value, Environment};

fn eval(source: &str) -> (Value, Environment) {
    eval_with(source, Environment::default())
}

fn eval_with(source: &str, env: Environment) -> (Value, Environment) {
    let tokens = crex::tokenize(source).unwrap();
    let program = crex::parse(tokens).unwrap();
    crex::evaluate(&program, env).unwrap()
}

fn eval_err(source: &str, env: Environment) -> RuntimeError {
    let tokens = crex::tokenize(source).unwrap();
    let program = crex::parse(tokens).unwrap();
    crex::evaluate(&program, env).unwrap_err()
}

fn env_of(pairs: &[(&str, i64)]) -> Environment {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), Value::Int(*value)))
        .collect()
}

#[test]
fn test_precedence() {
    assert_eq!(eval("2 + 3 * 4;").0, Value::Int(14));
    assert_eq!(eval("(2 + 3) * 4;").0, Value::Int(20));
}

#[test]
fn test_right_associative_assignment() {
    let (value, env) = eval("a = b = 5;");
    assert_eq!(value, Value::Int(5));
    assert_eq!(env.get("a"), Some(&Value::Int(5)));
    assert_eq!(env.get("b"), Some(&Value::Int(5)));
}

#[test]
fn test_short_circuit_and() {
    let (value, env) = eval_with("(a > 10) && (b++ > 0);", env_of(&[("a", 5), ("b", 10)]));
    assert_eq!(value, Value::Int(0));
    // The right side never ran.
    assert_eq!(env.get("b"), Some(&Value::Int(10)));
}

#[test]
fn test_short_circuit_or() {
    let (value, env) = eval_with("(a < 10) || (b++ > 0);", env_of(&[("a", 5), ("b", 10)]));
    assert_eq!(value, Value::Int(1));
    assert_eq!(env.get("b"), Some(&Value::Int(10)));
}

#[test]
fn test_logical_result_is_always_boolean_int() {
    assert_eq!(eval_with("a && 7;", env_of(&[("a", 3)])).0, Value::Int(1));
    assert_eq!(eval_with("0 || a;", env_of(&[("a", 3)])).0, Value::Int(1));
}

#[test]
fn test_pre_vs_post_increment() {
    let (value, env) = eval_with("x++ + ++y;", env_of(&[("x", 5), ("y", 5)]));
    assert_eq!(value, Value::Int(11));
    assert_eq!(env.get("x"), Some(&Value::Int(6)));
    assert_eq!(env.get("y"), Some(&Value::Int(6)));
}

#[test]
fn test_ternary_with_embedded_comma() {
    let (value, env) = eval_with(
        "a > 5 ? b += 5, b : c;",
        env_of(&[("a", 10), ("b", 1), ("c", 99)]),
    );
    assert_eq!(value, Value::Int(6));
    assert_eq!(env.get("b"), Some(&Value::Int(6)));
}

#[test]
fn test_ternary_untaken_branch_has_no_effect() {
    let (value, env) = eval_with("a > 5 ? b++ : c++;", env_of(&[("a", 1), ("b", 0), ("c", 0)]));
    assert_eq!(value, Value::Int(0));
    assert_eq!(env.get("b"), Some(&Value::Int(0)));
    assert_eq!(env.get("c"), Some(&Value::Int(1)));
}

#[test]
fn test_subscript_read() {
    let mut env = Environment::default();
    env.insert(
        "arr".to_string(),
        Value::array(vec![Value::Int(10), Value::Int(20), Value::Int(30)]),
    );
    env.insert("idx".to_string(), Value::Int(1));
    assert_eq!(eval_with("arr[idx] + 50;", env).0, Value::Int(70));
}

#[test]
fn test_comma_yields_rightmost() {
    let (value, env) = eval("a = 1, a + 1;");
    assert_eq!(value, Value::Int(2));
    assert_eq!(env.get("a"), Some(&Value::Int(1)));
}

#[test]
fn test_floor_division_and_modulo() {
    // Floor semantics: quotient rounds toward negative infinity and the
    // remainder carries the sign of the divisor.
    assert_eq!(eval("(-7) / 2;").0, Value::Int(-4));
    assert_eq!(eval("(-7) % 2;").0, Value::Int(1));
    assert_eq!(eval("7 / -2;").0, Value::Int(-4));
    assert_eq!(eval("7 % -2;").0, Value::Int(-1));
    assert_eq!(eval("7 / 2;").0, Value::Int(3));
    assert_eq!(eval("7 % 2;").0, Value::Int(1));
}

#[test]
fn test_float_promotion() {
    assert_eq!(eval("1 / 2;").0, Value::Int(0));
    assert_eq!(eval("1.0 / 2;").0, Value::Float(0.5));
    assert_eq!(eval("2 * 1.5;").0, Value::Float(3.0));
    assert_eq!(eval("1 + 2.5;").0, Value::Float(3.5));
}

#[test]
fn test_bitwise_coerces_floats_to_int() {
    // Floats truncate toward zero before bitwise operators.
    assert_eq!(eval("3.9 & 1;").0, Value::Int(1));
    assert_eq!(eval("1.5 << 2;").0, Value::Int(4));
    assert_eq!(eval("~2.7;").0, Value::Int(-3));
    assert_eq!(eval("7.9 % 3;").0, Value::Int(1));
}

#[test]
fn test_comparisons_yield_int() {
    assert_eq!(eval("3 < 4;").0, Value::Int(1));
    assert_eq!(eval("3 >= 4;").0, Value::Int(0));
    assert_eq!(eval("2.5 == 2.5;").0, Value::Int(1));
    assert_eq!(eval("2 != 2.0;").0, Value::Int(0));
}

#[test]
fn test_number_literal_bases() {
    assert_eq!(eval("0x10 + 0b101 + 010;").0, Value::Int(16 + 5 + 8));
    assert_eq!(eval("1e2;").0, Value::Float(100.0));
}

#[test]
fn test_unary_operators() {
    assert_eq!(eval("!0;").0, Value::Int(1));
    assert_eq!(eval("!5;").0, Value::Int(0));
    assert_eq!(eval("~5;").0, Value::Int(-6));
    assert_eq!(eval("-(3 + 4);").0, Value::Int(-7));
    assert_eq!(eval("+3.5;").0, Value::Float(3.5));
}

#[test]
fn test_idempotence_of_pure_expressions() {
    let program = crex::parse(crex::tokenize("a * b + (a > b);").unwrap()).unwrap();
    assert!(program.statements[0].is_pure());
    assert!(!crex::parse(crex::tokenize("a++;").unwrap()).unwrap().statements[0].is_pure());

    let env = env_of(&[("a", 5), ("b", 10)]);
    let (first, env_after_first) = eval_with("a * b + (a > b);", env.clone());
    let (second, env_after_second) = eval_with("a * b + (a > b);", env.clone());
    assert_eq!(first, second);
    assert_eq!(env_after_first, env);
    assert_eq!(env_after_second, env);
}

#[test]
fn test_division_by_zero() {
    assert!(matches!(
        eval_err("a / 0;", env_of(&[("a", 5)])),
        RuntimeError::DivisionByZero { .. }
    ));
    assert!(matches!(
        eval_err("a % 0;", env_of(&[("a", 5)])),
        RuntimeError::DivisionByZero { .. }
    ));
    assert!(matches!(
        eval_err("a /= 0;", env_of(&[("a", 5)])),
        RuntimeError::DivisionByZero { .. }
    ));
    assert!(matches!(
        eval_err("1.0 / 0.0;", Environment::default()),
        RuntimeError::DivisionByZero { .. }
    ));
}

#[test]
fn test_non_lvalue_assignment_fails_at_evaluation() {
    assert!(matches!(
        eval_err("5 = x;", env_of(&[("x", 1)])),
        RuntimeError::InvalidLvalue { .. }
    ));
    assert!(matches!(
        eval_err("(a + 1) = 2;", env_of(&[("a", 1)])),
        RuntimeError::InvalidLvalue { .. }
    ));
    assert!(matches!(
        eval_err("5++;", Environment::default()),
        RuntimeError::InvalidLvalue { .. }
    ));
}

#[test]
fn test_lexical_error_reports_exact_column() {
    let err = crex::tokenize("a = 1 @ 2;").unwrap_err();
    let message = err.to_string();
    assert!(
        message.contains("line 1, column 7"),
        "unexpected message: {message}"
    );
}

#[test]
fn test_integer_overflow() {
    assert!(matches!(
        eval_err("9223372036854775807 + 1;", Environment::default()),
        RuntimeError::IntegerOverflow { .. }
    ));
    assert!(matches!(
        eval_err("1 << 64;", Environment::default()),
        RuntimeError::IntegerOverflow { .. }
    ));
    assert!(matches!(
        eval_err("1 << -1;", Environment::default()),
        RuntimeError::IntegerOverflow { .. }
    ));
}

#[test]
fn test_array_in_arithmetic_is_a_type_error() {
    let mut env = Environment::default();
    env.insert("arr".to_string(), Value::array(vec![Value::Int(1)]));
    assert!(matches!(
        eval_err("arr + 1;", env),
        RuntimeError::TypeMismatch { .. }
    ));
}

#[test]
fn test_deeply_nested_parentheses() {
    let depth = 200;
    let source = format!("{}1 + 1{};", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(eval(&source).0, Value::Int(2));
}

#[test]
fn test_long_operator_chain() {
    let source = format!("0{};", " + 1".repeat(500));
    assert_eq!(eval(&source).0, Value::Int(500));
}

#[test]
fn test_array_truthiness() {
    let mut env = Environment::default();
    env.insert("full".to_string(), Value::array(vec![Value::Int(0)]));
    env.insert("empty".to_string(), Value::array(vec![]));
    let (value, _) = eval_with("(full && 1) + (empty || 0);", env);
    assert_eq!(value, Value::Int(1));
}
