//! Operator implementations, split by arity: binary, unary, assignment

mod assign;
mod binary;
mod unary;
