use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Classification of a node in a value tree.
///
/// `Undefined` never describes a stored value; it is what an absent value
/// (a missing key, an out-of-range index) classifies as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Null,
    Undefined,
    Bool,
    Number,
    String,
    Object,
    Array,
}

impl ValueKind {
    /// Classify a present value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Object(_) => ValueKind::Object,
            Value::Array(_) => ValueKind::Array,
        }
    }

    /// Classify a possibly-absent value.
    pub fn of_opt(value: Option<&Value>) -> Self {
        value.map_or(ValueKind::Undefined, Self::of)
    }

    /// Returns `true` for everything except objects and arrays.
    pub fn is_leaf(self) -> bool {
        !self.is_container()
    }

    /// Returns `true` for objects and arrays.
    pub fn is_container(self) -> bool {
        matches!(self, ValueKind::Object | ValueKind::Array)
    }

    /// Lowercase name, as used in logs and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Undefined => "undefined",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Object => "object",
            ValueKind::Array => "array",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
