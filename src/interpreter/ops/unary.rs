//! Unary operator evaluation

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::{AstNode, BinOp, SourceLocation, UnOp};

impl Interpreter {
    /// Evaluate a unary expression node.
    pub(crate) fn evaluate_unary(
        &mut self,
        op: UnOp,
        operand: &AstNode,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        match op {
            UnOp::Not => {
                let value = self.evaluate_expr(operand)?;
                Ok(Value::Int(!value.is_truthy() as i64))
            }

            UnOp::BitNot => {
                let value = self.evaluate_expr(operand)?;
                let n = value
                    .as_int()
                    .ok_or_else(|| self.numeric_type_error(&value, location))?;
                Ok(Value::Int(!n))
            }

            UnOp::Plus => {
                let value = self.evaluate_expr(operand)?;
                match value {
                    Value::Int(_) | Value::Float(_) => Ok(value),
                    _ => Err(self.numeric_type_error(&value, location)),
                }
            }

            UnOp::Neg => {
                let value = self.evaluate_expr(operand)?;
                match value {
                    Value::Int(n) => n
                        .checked_neg()
                        .ok_or_else(|| RuntimeError::IntegerOverflow {
                            operation: format!("-{}", n),
                            location,
                        })
                        .map(Value::Int),
                    Value::Float(f) => Ok(Value::Float(-f)),
                    _ => Err(self.numeric_type_error(&value, location)),
                }
            }

            UnOp::PreInc | UnOp::PreDec | UnOp::PostInc | UnOp::PostDec => {
                self.evaluate_step(op, operand, location)
            }
        }
    }

    /// Increment/decrement: the operand must name a variable. Prefix forms
    /// return the updated value, postfix forms the original.
    fn evaluate_step(
        &mut self,
        op: UnOp,
        operand: &AstNode,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let name = match operand {
            AstNode::Identifier(name, _) => name.clone(),
            _ => {
                return Err(RuntimeError::InvalidLvalue {
                    message: format!("operator '{}' requires a variable", op),
                    location,
                })
            }
        };

        let old = self.lookup(&name, location)?;
        let delta = match op {
            UnOp::PreInc | UnOp::PostInc => BinOp::Add,
            _ => BinOp::Sub,
        };
        let new = self.apply_binary(delta, &old, &Value::Int(1), location)?;
        self.bind(&name, new.clone());

        match op {
            UnOp::PreInc | UnOp::PreDec => Ok(new),
            _ => Ok(old),
        }
    }
}
