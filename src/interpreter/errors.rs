//! Runtime error types for the expression interpreter
//!
//! This module defines [`RuntimeError`], which represents all errors that can
//! occur during evaluation (as opposed to lexical or syntax errors).
//!
//! All runtime errors are fatal and carry the source position of the
//! offending construct.

use crate::parser::ast::SourceLocation;
use thiserror::Error;

/// Runtime errors that can occur during evaluation
#[derive(Debug, Clone, Error)]
pub enum RuntimeError {
    /// Reference to a name with no binding (strict mode only)
    #[error("Undefined variable '{name}' at {location}")]
    UndefinedVariable {
        name: String,
        location: SourceLocation,
    },

    /// Division or modulo with a zero right operand
    #[error("Division by zero in '{operation}' at {location}")]
    DivisionByZero {
        operation: String,
        location: SourceLocation,
    },

    /// Assignment or increment/decrement applied to a non-assignable target
    #[error("Invalid assignment target at {location}: {message}")]
    InvalidLvalue {
        message: String,
        location: SourceLocation,
    },

    /// Subscript applied to a non-array, or an index outside the array
    #[error("Subscript error at {location}: {message}")]
    Subscript {
        message: String,
        location: SourceLocation,
    },

    /// Integer arithmetic left the 64-bit range, or a shift amount was
    /// outside 0..64
    #[error("Integer overflow in operation: {operation} at {location}")]
    IntegerOverflow {
        operation: String,
        location: SourceLocation,
    },

    /// Operand type not usable by the operator
    #[error("Type error at {location}: expected {expected}, got {got}")]
    TypeMismatch {
        expected: String,
        got: String,
        location: SourceLocation,
    },

    /// An operator tag reached a dispatch path that cannot handle it
    #[error("Unknown operator '{operator}' at {location}")]
    UnknownOperator {
        operator: String,
        location: SourceLocation,
    },
}

impl RuntimeError {
    pub fn location(&self) -> SourceLocation {
        match self {
            RuntimeError::UndefinedVariable { location, .. } => *location,
            RuntimeError::DivisionByZero { location, .. } => *location,
            RuntimeError::InvalidLvalue { location, .. } => *location,
            RuntimeError::Subscript { location, .. } => *location,
            RuntimeError::IntegerOverflow { location, .. } => *location,
            RuntimeError::TypeMismatch { location, .. } => *location,
            RuntimeError::UnknownOperator { location, .. } => *location,
        }
    }
}
