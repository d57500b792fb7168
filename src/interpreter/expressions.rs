//! Expression evaluation dispatch

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::{AstNode, SourceLocation};

impl Interpreter {
    /// Evaluate an expression to a value.
    pub(crate) fn evaluate_expr(&mut self, expr: &AstNode) -> Result<Value, RuntimeError> {
        match expr {
            AstNode::Identifier(name, location) => self.lookup(name, *location),

            AstNode::NumberLiteral(text, location) => {
                Value::from_literal(text).ok_or_else(|| RuntimeError::IntegerOverflow {
                    operation: format!("literal {}", text),
                    location: *location,
                })
            }

            AstNode::BinaryOp {
                op,
                left,
                right,
                location,
            } => self.evaluate_binary(*op, left, right, *location),

            AstNode::UnaryOp {
                op,
                operand,
                location,
            } => self.evaluate_unary(*op, operand, *location),

            AstNode::Assignment {
                op,
                target,
                value,
                location,
            } => self.evaluate_assignment(*op, target, value, *location),

            AstNode::Conditional {
                condition,
                true_expr,
                false_expr,
                ..
            } => {
                // Only the selected branch is evaluated.
                if self.evaluate_expr(condition)?.is_truthy() {
                    self.evaluate_expr(true_expr)
                } else {
                    self.evaluate_expr(false_expr)
                }
            }

            AstNode::Subscript {
                container,
                index,
                location,
            } => self.evaluate_subscript(container, index, *location),

            statement @ (AstNode::Declaration { .. }
            | AstNode::ExpressionStatement { .. }
            | AstNode::EmptyStatement { .. }) => self.execute_statement(statement),
        }
    }

    /// Evaluate a subscript read: the container must evaluate to an array
    /// and the index must be a number within bounds (floats truncate).
    fn evaluate_subscript(
        &mut self,
        container: &AstNode,
        index: &AstNode,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let container_value = self.evaluate_expr(container)?;
        let index_value = self.evaluate_expr(index)?;

        let elements = match &container_value {
            Value::Array(elements) => elements,
            other => {
                return Err(RuntimeError::Subscript {
                    message: format!("cannot subscript a value of type {}", other.type_name()),
                    location,
                })
            }
        };

        let idx = index_value.as_int().ok_or_else(|| RuntimeError::Subscript {
            message: format!("index must be a number, got {}", index_value.type_name()),
            location,
        })?;

        let elements = elements.borrow();
        if idx < 0 || idx as usize >= elements.len() {
            return Err(RuntimeError::Subscript {
                message: format!("index {} out of bounds for length {}", idx, elements.len()),
                location,
            });
        }

        Ok(elements[idx as usize].clone())
    }
}
