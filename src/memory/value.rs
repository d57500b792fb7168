//! Runtime values
//!
//! The interpreter works over three value kinds: 64-bit integers, double
//! floats, and arrays. Arrays are shared by handle (`Rc<RefCell<...>>`):
//! cloning a [`Value::Array`] clones the handle, not the elements, so
//! subscript writes through any copy are visible through every copy.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A runtime value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Array(Rc<RefCell<Vec<Value>>>),
}

impl Value {
    /// Construct an array value from elements.
    pub fn array(elements: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(elements)))
    }

    /// Resolve a numeric literal from its raw source text.
    ///
    /// - `0x`/`0X` prefix: hexadecimal integer
    /// - `0b`/`0B` prefix: binary integer
    /// - contains `.`, `e`, or `E`: float
    /// - leading `0` with more digits: octal integer
    /// - otherwise: decimal integer
    ///
    /// Returns `None` when the digits are out of range for the base or the
    /// integer value does not fit in 64 bits.
    pub fn from_literal(text: &str) -> Option<Value> {
        if let Some(rest) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            return i64::from_str_radix(rest, 16).ok().map(Value::Int);
        }
        if let Some(rest) = text.strip_prefix("0b").or_else(|| text.strip_prefix("0B")) {
            return i64::from_str_radix(rest, 2).ok().map(Value::Int);
        }
        if text.contains(['.', 'e', 'E']) {
            return text.parse::<f64>().ok().map(Value::Float);
        }
        if text.len() > 1 && text.starts_with('0') {
            return i64::from_str_radix(&text[1..], 8).ok().map(Value::Int);
        }
        text.parse::<i64>().ok().map(Value::Int)
    }

    /// Coerce to an integer for bitwise and shift operations. Floats are
    /// truncated toward zero; arrays have no integer form.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Float(f) => Some(*f as i64),
            Value::Array(_) => None,
        }
    }

    /// Coerce to a float for mixed-mode arithmetic.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            Value::Array(_) => None,
        }
    }

    /// C truthiness: nonzero numbers are true, and an array is true when it
    /// has at least one element.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Array(elements) => !elements.borrow().is_empty(),
        }
    }

    /// Human-readable type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Array(_) => "array",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Array(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_bases() {
        assert_eq!(Value::from_literal("42"), Some(Value::Int(42)));
        assert_eq!(Value::from_literal("0x1F"), Some(Value::Int(31)));
        assert_eq!(Value::from_literal("0XFF"), Some(Value::Int(255)));
        assert_eq!(Value::from_literal("0b1010"), Some(Value::Int(10)));
        assert_eq!(Value::from_literal("0777"), Some(Value::Int(511)));
    }

    #[test]
    fn test_literal_floats() {
        assert_eq!(Value::from_literal("3.14"), Some(Value::Float(3.14)));
        assert_eq!(Value::from_literal("12."), Some(Value::Float(12.0)));
        assert_eq!(Value::from_literal("1e3"), Some(Value::Float(1000.0)));
        assert_eq!(Value::from_literal("2.5E-1"), Some(Value::Float(0.25)));
    }

    #[test]
    fn test_literal_edge_cases() {
        // A lone zero is decimal, not octal.
        assert_eq!(Value::from_literal("0"), Some(Value::Int(0)));
        // Octal with a non-octal digit is rejected.
        assert_eq!(Value::from_literal("09"), None);
        // Too large for 64 bits.
        assert_eq!(Value::from_literal("99999999999999999999"), None);
    }

    #[test]
    fn test_truthiness() {
        assert!(Value::Int(1).is_truthy());
        assert!(!Value::Int(0).is_truthy());
        assert!(Value::Float(0.5).is_truthy());
        assert!(!Value::Float(0.0).is_truthy());
        assert!(!Value::array(vec![]).is_truthy());
        assert!(Value::array(vec![Value::Int(0)]).is_truthy());
    }

    #[test]
    fn test_array_clone_shares_storage() {
        let a = Value::array(vec![Value::Int(1)]);
        let b = a.clone();
        if let Value::Array(elements) = &a {
            elements.borrow_mut()[0] = Value::Int(99);
        }
        if let Value::Array(elements) = &b {
            assert_eq!(elements.borrow()[0], Value::Int(99));
        }
    }

    #[test]
    fn test_int_coercion_truncates() {
        assert_eq!(Value::Float(2.9).as_int(), Some(2));
        assert_eq!(Value::Float(-2.9).as_int(), Some(-2));
        assert_eq!(Value::array(vec![]).as_int(), None);
    }
}
