//! Binary operator evaluation
//!
//! Logical operators and comma are handled first because they control
//! whether the right operand is evaluated at all. Everything else is a
//! strict scalar operation dispatched through [`Interpreter::apply_binary`],
//! which compound assignment reuses for its read-modify-write step.
//!
//! Numeric rules:
//! - `+ - * /` promote to float when either operand is a float
//! - `/` and `%` on integers use floor semantics, matching sign of divisor
//! - `% << >> & | ^` coerce both operands to integers (floats truncate)
//! - comparisons yield integer 1 or 0

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::{AstNode, BinOp, SourceLocation};

/// Floor division, rounding toward negative infinity.
fn floor_div(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    let r = a.checked_rem(b)?;
    if r != 0 && (r < 0) != (b < 0) {
        q.checked_sub(1)
    } else {
        Some(q)
    }
}

/// Floor modulo: the result carries the sign of the divisor.
fn floor_mod(a: i64, b: i64) -> Option<i64> {
    let r = a.checked_rem(b)?;
    if r != 0 && (r < 0) != (b < 0) {
        r.checked_add(b)
    } else {
        Some(r)
    }
}

impl Interpreter {
    /// Evaluate a binary expression node.
    pub(crate) fn evaluate_binary(
        &mut self,
        op: BinOp,
        left: &AstNode,
        right: &AstNode,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        match op {
            BinOp::And => {
                if !self.evaluate_expr(left)?.is_truthy() {
                    return Ok(Value::Int(0));
                }
                let right = self.evaluate_expr(right)?;
                Ok(Value::Int(right.is_truthy() as i64))
            }
            BinOp::Or => {
                if self.evaluate_expr(left)?.is_truthy() {
                    return Ok(Value::Int(1));
                }
                let right = self.evaluate_expr(right)?;
                Ok(Value::Int(right.is_truthy() as i64))
            }
            BinOp::Comma => {
                // Left is evaluated for effect only.
                self.evaluate_expr(left)?;
                self.evaluate_expr(right)
            }
            _ => {
                let left = self.evaluate_expr(left)?;
                let right = self.evaluate_expr(right)?;
                self.apply_binary(op, &left, &right, location)
            }
        }
    }

    /// Apply a strict scalar operator to already-evaluated operands.
    ///
    /// `And`, `Or`, and `Comma` never reach here; they are rejected as
    /// unknown because they have no strict form.
    pub(crate) fn apply_binary(
        &self,
        op: BinOp,
        left: &Value,
        right: &Value,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        if let Value::Array(_) = left {
            return Err(self.numeric_type_error(left, location));
        }
        if let Value::Array(_) = right {
            return Err(self.numeric_type_error(right, location));
        }

        match op {
            BinOp::Add => self.arith(op, left, right, location, i64::checked_add, |a, b| a + b),
            BinOp::Sub => self.arith(op, left, right, location, i64::checked_sub, |a, b| a - b),
            BinOp::Mul => self.arith(op, left, right, location, i64::checked_mul, |a, b| a * b),

            BinOp::Div => {
                if !right.is_truthy() {
                    return Err(RuntimeError::DivisionByZero {
                        operation: format!("{} / {}", left, right),
                        location,
                    });
                }
                self.arith(op, left, right, location, floor_div, |a, b| a / b)
            }

            BinOp::Mod => {
                let (a, b) = self.int_operands(left, right, location)?;
                if b == 0 {
                    return Err(RuntimeError::DivisionByZero {
                        operation: format!("{} % {}", a, b),
                        location,
                    });
                }
                floor_mod(a, b)
                    .ok_or_else(|| RuntimeError::IntegerOverflow {
                        operation: format!("{} % {}", a, b),
                        location,
                    })
                    .map(Value::Int)
            }

            BinOp::Shl | BinOp::Shr => {
                let (a, b) = self.int_operands(left, right, location)?;
                if !(0..64).contains(&b) {
                    return Err(RuntimeError::IntegerOverflow {
                        operation: format!("{} {} {}", a, op, b),
                        location,
                    });
                }
                let result = match op {
                    BinOp::Shl => a << b,
                    _ => a >> b,
                };
                Ok(Value::Int(result))
            }

            BinOp::BitAnd | BinOp::BitOr | BinOp::BitXor => {
                let (a, b) = self.int_operands(left, right, location)?;
                let result = match op {
                    BinOp::BitAnd => a & b,
                    BinOp::BitOr => a | b,
                    _ => a ^ b,
                };
                Ok(Value::Int(result))
            }

            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
                self.compare(op, left, right)
            }

            BinOp::And | BinOp::Or | BinOp::Comma => Err(RuntimeError::UnknownOperator {
                operator: op.symbol().to_string(),
                location,
            }),
        }
    }

    /// Arithmetic with float promotion: floats when either operand is a
    /// float, checked integers otherwise.
    fn arith(
        &self,
        op: BinOp,
        left: &Value,
        right: &Value,
        location: SourceLocation,
        int_op: impl Fn(i64, i64) -> Option<i64>,
        float_op: impl Fn(f64, f64) -> f64,
    ) -> Result<Value, RuntimeError> {
        match (left, right) {
            (Value::Int(a), Value::Int(b)) => int_op(*a, *b)
                .ok_or_else(|| RuntimeError::IntegerOverflow {
                    operation: format!("{} {} {}", a, op, b),
                    location,
                })
                .map(Value::Int),
            _ => {
                // At least one float; arrays were rejected by the caller.
                let a = left.as_float().unwrap_or(0.0);
                let b = right.as_float().unwrap_or(0.0);
                Ok(Value::Float(float_op(a, b)))
            }
        }
    }

    /// Numeric comparison, promoted to float when either side is a float.
    fn compare(&self, op: BinOp, left: &Value, right: &Value) -> Result<Value, RuntimeError> {
        let result = match (left, right) {
            (Value::Int(a), Value::Int(b)) => match op {
                BinOp::Eq => a == b,
                BinOp::Ne => a != b,
                BinOp::Lt => a < b,
                BinOp::Le => a <= b,
                BinOp::Gt => a > b,
                _ => a >= b,
            },
            _ => {
                let a = left.as_float().unwrap_or(0.0);
                let b = right.as_float().unwrap_or(0.0);
                match op {
                    BinOp::Eq => a == b,
                    BinOp::Ne => a != b,
                    BinOp::Lt => a < b,
                    BinOp::Le => a <= b,
                    BinOp::Gt => a > b,
                    _ => a >= b,
                }
            }
        };
        Ok(Value::Int(result as i64))
    }

    /// Coerce both operands to integers for bitwise/shift/modulo operators.
    pub(crate) fn int_operands(
        &self,
        left: &Value,
        right: &Value,
        location: SourceLocation,
    ) -> Result<(i64, i64), RuntimeError> {
        match (left.as_int(), right.as_int()) {
            (Some(a), Some(b)) => Ok((a, b)),
            (None, _) => Err(self.numeric_type_error(left, location)),
            (_, None) => Err(self.numeric_type_error(right, location)),
        }
    }

    pub(crate) fn numeric_type_error(&self, value: &Value, location: SourceLocation) -> RuntimeError {
        RuntimeError::TypeMismatch {
            expected: "number".to_string(),
            got: value.type_name().to_string(),
            location,
        }
    }
}
