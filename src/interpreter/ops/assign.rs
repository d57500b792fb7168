//! Assignment evaluation
//!
//! The right-hand side is always evaluated first. Targets are validated
//! here, at evaluation time: the parser accepts any expression in target
//! position, and anything other than an identifier or a subscript of an
//! array variable is rejected with an invalid-lvalue error.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::{AssignOp, AstNode, SourceLocation};
use crate::trace::TraceEvent;

impl Interpreter {
    /// Evaluate an assignment expression node, returning the stored value.
    pub(crate) fn evaluate_assignment(
        &mut self,
        op: AssignOp,
        target: &AstNode,
        value: &AstNode,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let rhs = self.evaluate_expr(value)?;

        match target {
            AstNode::Identifier(name, _) => self.assign_variable(op, name, rhs, location),
            AstNode::Subscript {
                container, index, ..
            } => self.assign_element(op, container, index, rhs, location),
            _ => Err(RuntimeError::InvalidLvalue {
                message: format!("cannot assign with '{}' to this expression", op),
                location,
            }),
        }
    }

    fn assign_variable(
        &mut self,
        op: AssignOp,
        name: &str,
        rhs: Value,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let new = match op.binary_op() {
            None => rhs,
            Some(binary) => {
                // Compound forms read-or-default the binding to 0, in both
                // undefined-name policies.
                let current = self
                    .env()
                    .get(name)
                    .cloned()
                    .unwrap_or(Value::Int(0));
                self.apply_binary(binary, &current, &rhs, location)?
            }
        };

        self.bind(name, new.clone());
        Ok(new)
    }

    fn assign_element(
        &mut self,
        op: AssignOp,
        container: &AstNode,
        index: &AstNode,
        rhs: Value,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        // Subscript targets must name an array variable directly.
        let name = match container {
            AstNode::Identifier(name, _) => name.clone(),
            _ => {
                return Err(RuntimeError::InvalidLvalue {
                    message: "subscript assignment requires a named array".to_string(),
                    location,
                })
            }
        };

        let container_value = self.lookup(&name, location)?;
        let elements = match &container_value {
            Value::Array(elements) => elements,
            other => {
                return Err(RuntimeError::Subscript {
                    message: format!("cannot subscript a value of type {}", other.type_name()),
                    location,
                })
            }
        };

        let index_value = self.evaluate_expr(index)?;
        let idx = index_value.as_int().ok_or_else(|| RuntimeError::Subscript {
            message: format!("index must be a number, got {}", index_value.type_name()),
            location,
        })?;

        let len = elements.borrow().len();
        if idx < 0 || idx as usize >= len {
            return Err(RuntimeError::Subscript {
                message: format!("index {} out of bounds for length {}", idx, len),
                location,
            });
        }

        let new = match op.binary_op() {
            None => rhs,
            Some(binary) => {
                let current = elements.borrow()[idx as usize].clone();
                self.apply_binary(binary, &current, &rhs, location)?
            }
        };

        elements.borrow_mut()[idx as usize] = new.clone();
        self.trace(TraceEvent::Assignment {
            name,
            value: container_value.clone(),
        });
        Ok(new)
    }
}
