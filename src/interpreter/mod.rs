//! Tree-walking evaluation of parsed programs
//!
//! The [`engine::Interpreter`] owns the environment and statement loop;
//! expression dispatch and the operator implementations are split across
//! `impl` blocks in `expressions` and `ops`.

pub mod engine;
pub mod errors;
mod expressions;
mod ops;
