//! Runtime values for the Rill runtime.
//!
//! # Heap Enforcement
//!
//! Heap-backed payloads (`BigInt`, `Str`) are wrapped in `Heap<T>`, whose
//! constructor is private to this module. Build them with the factory
//! methods:
//!
//! ```text
//! let s = Value::string("hello");     // OK
//! let n = Value::bigint(7);           // OK
//! let s = Value::Str(Heap::new(..));  // ERROR: Heap::new is pub(super)
//! ```
//!
//! # Conversions
//!
//! The language-level conversions (`to_number`, `to_numeric`,
//! `to_display_string`, `to_int32`, `to_uint32`) and comparisons
//! (`strict_equals`, `loose_equals`, `compare`) live here so that every
//! generic operator path shares one definition.

mod function;
mod heap;
mod number;

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use num_bigint::BigInt;

pub use function::{
    CompiledMethod, FunctionKind, FunctionValue, Invocation, MethodEntry, MethodId, MethodRef,
};
pub use heap::Heap;
pub use number::{
    bigint_equals_number, compare_bigint_number, format_number, string_to_bigint,
    string_to_number,
};

use crate::errors::{bigint_to_number, EvalError};
use crate::object::ObjectRef;

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    /// IEEE-754 double.
    Number(f64),
    /// Arbitrary-precision integer.
    BigInt(Heap<BigInt>),
    Str(Heap<str>),
    Object(ObjectRef),
    Function(FunctionValue),
}

/// Result of numeric conversion: exactly one of the two numeric kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum Numeric {
    Number(f64),
    BigInt(Heap<BigInt>),
}

impl Numeric {
    pub fn into_value(self) -> Value {
        match self {
            Numeric::Number(n) => Value::Number(n),
            Numeric::BigInt(b) => Value::BigInt(b),
        }
    }
}

// Factory Methods

impl Value {
    #[inline]
    pub fn number(n: f64) -> Self {
        Value::Number(n)
    }

    #[inline]
    pub fn boolean(b: bool) -> Self {
        Value::Bool(b)
    }

    /// Create a BigInt value.
    ///
    /// ```text
    /// let n = Value::bigint(42);
    /// let big = Value::bigint(BigInt::from(1) << 100);
    /// ```
    #[inline]
    pub fn bigint(n: impl Into<BigInt>) -> Self {
        Value::BigInt(Heap::new(n.into()))
    }

    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::from_arc(Arc::from(s.into())))
    }

    #[inline]
    pub fn object(obj: ObjectRef) -> Self {
        Value::Object(obj)
    }

    /// Create a fresh function instance of `method`.
    #[inline]
    pub fn function(method: &MethodRef) -> Self {
        Value::Function(FunctionValue::new(method.clone()))
    }
}

// Accessors

impl Value {
    /// Name used in error messages (`typeof`-style, with `null` split out).
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::BigInt(_) => "bigint",
            Value::Str(_) => "string",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bigint(&self) -> Option<&BigInt> {
        match self {
            Value::BigInt(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionValue> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Objects and functions.
    pub fn is_object_like(&self) -> bool {
        matches!(self, Value::Object(_) | Value::Function(_))
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::BigInt(b) => b.sign() != num_bigint::Sign::NoSign,
            Value::Str(s) => !s.is_empty(),
            Value::Object(_) | Value::Function(_) => true,
        }
    }
}

// Conversions

impl Value {
    /// Reduce objects to a primitive. Primitives are returned unchanged.
    ///
    /// Objects have no user-defined conversion hooks here; they render as
    /// their default string tag.
    pub fn to_primitive(&self) -> Value {
        match self {
            Value::Object(obj) => Value::string(format!("[object {}]", obj.class_name())),
            Value::Function(func) => {
                Value::string(format!("function {}() {{ [native code] }}", func.name()))
            }
            other => other.clone(),
        }
    }

    /// Convert to a number. BigInts are rejected.
    pub fn to_number(&self) -> Result<f64, EvalError> {
        match self {
            Value::Undefined => Ok(f64::NAN),
            Value::Null => Ok(0.0),
            Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::Number(n) => Ok(*n),
            Value::BigInt(_) => Err(bigint_to_number()),
            Value::Str(s) => Ok(string_to_number(s)),
            Value::Object(_) | Value::Function(_) => self.to_primitive().to_number(),
        }
    }

    /// Convert to either numeric kind, keeping BigInts as BigInts.
    pub fn to_numeric(&self) -> Result<Numeric, EvalError> {
        match self.to_primitive() {
            Value::BigInt(b) => Ok(Numeric::BigInt(b)),
            prim => prim.to_number().map(Numeric::Number),
        }
    }

    /// Convert to the string the language would print.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::BigInt(b) => b.to_string(),
            Value::Str(s) => s.to_string(),
            Value::Object(_) | Value::Function(_) => self.to_primitive().to_display_string(),
        }
    }

    pub fn to_int32(&self) -> Result<i32, EvalError> {
        self.to_number().map(f64_to_int32)
    }

    pub fn to_uint32(&self) -> Result<u32, EvalError> {
        self.to_number().map(f64_to_uint32)
    }
}

/// Wrap a number to a signed 32-bit integer (modulo 2^32).
pub fn f64_to_int32(n: f64) -> i32 {
    f64_to_uint32(n) as i32
}

/// Wrap a number to an unsigned 32-bit integer (modulo 2^32).
pub fn f64_to_uint32(n: f64) -> u32 {
    if !n.is_finite() {
        return 0;
    }
    let wrapped = n.trunc().rem_euclid(4_294_967_296.0);
    wrapped as u32
}

/// UTF-16 code unit order, as the language compares strings.
pub fn compare_strings(a: &str, b: &str) -> Ordering {
    a.encode_utf16().cmp(b.encode_utf16())
}

// Equality and ordering

impl Value {
    /// `===`.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// `==`.
    pub fn loose_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (a, b) if std::mem::discriminant(a) == std::mem::discriminant(b) => {
                a.strict_equals(b)
            }
            (Value::Undefined | Value::Null, Value::Undefined | Value::Null) => true,
            (Value::Undefined | Value::Null, _) | (_, Value::Undefined | Value::Null) => false,
            (Value::Number(n), Value::Str(s)) | (Value::Str(s), Value::Number(n)) => {
                *n == string_to_number(s)
            }
            (Value::BigInt(b), Value::Str(s)) | (Value::Str(s), Value::BigInt(b)) => {
                string_to_bigint(s).is_some_and(|parsed| parsed == **b)
            }
            (Value::Bool(b), other) | (other, Value::Bool(b)) => {
                Value::Number(if *b { 1.0 } else { 0.0 }).loose_equals(other)
            }
            (obj, prim) | (prim, obj) if obj.is_object_like() && !prim.is_object_like() => {
                obj.to_primitive().loose_equals(prim)
            }
            (Value::BigInt(b), Value::Number(n)) | (Value::Number(n), Value::BigInt(b)) => {
                bigint_equals_number(b, *n)
            }
            _ => false,
        }
    }

    /// Three-way comparison for `<`, `<=`, `>`, `>=`.
    ///
    /// `None` means unordered (a NaN took part, or a string failed to parse
    /// as a BigInt); every relational operator is then `false`.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        let left = self.to_primitive();
        let right = other.to_primitive();
        match (&left, &right) {
            (Value::Str(a), Value::Str(b)) => Some(compare_strings(a, b)),
            (Value::BigInt(a), Value::Str(s)) => {
                string_to_bigint(s).map(|b| (**a).cmp(&b))
            }
            (Value::Str(s), Value::BigInt(b)) => {
                string_to_bigint(s).map(|a| a.cmp(b))
            }
            _ => {
                let l = left.to_numeric().ok()?;
                let r = right.to_numeric().ok()?;
                compare_numeric(&l, &r)
            }
        }
    }
}

/// Three-way comparison across numeric kinds.
pub fn compare_numeric(left: &Numeric, right: &Numeric) -> Option<Ordering> {
    match (left, right) {
        (Numeric::Number(a), Numeric::Number(b)) => a.partial_cmp(b),
        (Numeric::BigInt(a), Numeric::BigInt(b)) => Some(a.cmp(b)),
        (Numeric::BigInt(a), Numeric::Number(b)) => compare_bigint_number(a, *b),
        (Numeric::Number(a), Numeric::BigInt(b)) => {
            compare_bigint_number(b, *a).map(Ordering::reverse)
        }
    }
}

// Trait Implementations

/// Structural for primitives, identity for objects and functions.
///
/// Unlike `strict_equals`, `NaN` equals `NaN` here so that values can be
/// compared in tests and collections.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            _ => self.strict_equals(other),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::BigInt(b) => write!(f, "BigInt({}n)", &**b),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::Object(o) => write!(f, "{o:?}"),
            Value::Function(func) => write!(f, "{func:?}"),
        }
    }
}

/// Literal-style rendering: strings quoted, BigInts suffixed with `n`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{:?}", &**s),
            Value::BigInt(b) => write!(f, "{}n", &**b),
            Value::Function(func) => write!(f, "<function {}>", func.name()),
            other => f.write_str(&other.to_display_string()),
        }
    }
}
