//! Parsing pipeline: lexer, AST, and recursive descent parser
//!
//! - [`lexer`] turns source text into a token stream with positions
//! - [`ast`] defines the tree the parser produces
//! - [`parse`] holds the [`parse::Parser`] coordinator; the grammar itself
//!   lives in the `expressions` and `statements` impl blocks

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
