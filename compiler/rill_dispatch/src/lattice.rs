//! Operand classification for specialization.
//!
//! Four leaves plus `Other`. A pair classifies jointly only when both
//! operands share a leaf; any mix is `Other` and links generic.

use std::fmt;

use rill_value::Value;

/// Leaf of the numeric type lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
    String,
    Number,
    BigInt,
    Boolean,
    Other,
}

impl Classification {
    pub fn name(self) -> &'static str {
        match self {
            Classification::String => "string",
            Classification::Number => "number",
            Classification::BigInt => "bigint",
            Classification::Boolean => "boolean",
            Classification::Other => "other",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify one operand.
#[inline]
pub fn classify(value: &Value) -> Classification {
    match value {
        Value::Str(_) => Classification::String,
        Value::Number(_) => Classification::Number,
        Value::BigInt(_) => Classification::BigInt,
        Value::Bool(_) => Classification::Boolean,
        _ => Classification::Other,
    }
}

/// Classify an operand pair: the shared leaf, or `Other`.
#[inline]
pub fn classify_pair(left: &Value, right: &Value) -> Classification {
    let l = classify(left);
    if l == classify(right) {
        l
    } else {
        Classification::Other
    }
}
