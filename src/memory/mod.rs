//! Runtime value representation and the variable environment

pub mod value;

use rustc_hash::FxHashMap;
use self::value::Value;

/// The variable environment: a flat map from names to values. The language
/// has a single global scope, so no frame stack is needed.
pub type Environment = FxHashMap<String, Value>;
