//! # Introduction
//!
//! crex evaluates a subset of C expression and declaration statements
//! against a mutable variable environment and hands the environment back
//! when the run completes.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Interpreter → (Value, Environment)
//! ```
//!
//! 1. [`parser`] — tokenises the source and builds an AST.
//! 2. [`interpreter`] — walks the AST, executing statements against a flat
//!    environment; the program's value is the value of its last statement.
//! 3. [`memory`] — tagged [`memory::value::Value`] variants (64-bit
//!    integers, floats, shared arrays) and the [`memory::Environment`] map.
//! 4. [`trace`] — optional execution event recording.
//!
//! ## Supported C subset
//!
//! Expressions: the full operator set from comma down to primary (sixteen
//! precedence levels), including short-circuit `&&`/`||`, the conditional
//! operator, compound assignment, prefix/postfix `++`/`--`, and array
//! subscripts. Statements: declarations (`int a = 1, b;`), expression
//! statements, and the empty statement. No control flow, functions, or
//! pointers.
//!
//! ## Example
//!
//! ```
//! use crex::{evaluate, parse, tokenize};
//! use crex::memory::{value::Value, Environment};
//!
//! let tokens = tokenize("int a = 2 + 3 * 4;").unwrap();
//! let program = parse(tokens).unwrap();
//! let (value, env) = evaluate(&program, Environment::default()).unwrap();
//! assert_eq!(value, Value::Int(14));
//! assert_eq!(env.get("a"), Some(&Value::Int(14)));
//! ```

pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod trace;

use interpreter::engine::Interpreter;
use interpreter::errors::RuntimeError;
use memory::value::Value;
use memory::Environment;
use parser::ast::Program;
use parser::lexer::{LexError, Lexer, Token};
use parser::parse::{ParseError, Parser};

/// Tokenize source text into a fresh token stream.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// Parse a token stream into a program.
pub fn parse(tokens: Vec<Token>) -> Result<Program, ParseError> {
    Parser::new(tokens).parse_program()
}

/// Evaluate a program against a starting environment, returning the value
/// of its last statement together with the final environment.
pub fn evaluate(
    program: &Program,
    env: Environment,
) -> Result<(Value, Environment), RuntimeError> {
    let mut interpreter = Interpreter::with_env(env);
    let value = interpreter.run(program)?;
    Ok((value, interpreter.into_env()))
}
