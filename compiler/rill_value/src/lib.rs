//! Rill Value - runtime values, language errors and ordinary objects.
//!
//! This crate provides:
//! - `Value`: the tagged runtime value with its language-level conversions
//! - `EvalError` / `EvalErrorKind`: errors raised into the running program
//! - `MethodRef` / `FunctionValue`: compiled method descriptors and closures
//! - `ObjectRef`: ordinary objects whose indexed properties live in an
//!   adaptive element store

mod errors;
mod object;
mod value;

pub use errors::{
    arity_mismatch, bigint_to_number, bigint_too_large, class_constructor_call, division_by_zero,
    invalid_operand, mixed_numeric_kinds, negative_exponent, not_callable, not_constructor,
    stack_exhausted, ErrorCategory, EvalError, EvalErrorKind, EvalResult,
};
pub use object::{ObjectData, ObjectRef, PropertyKey};
pub use value::{
    bigint_equals_number, compare_bigint_number, compare_numeric, compare_strings, f64_to_int32,
    f64_to_uint32, format_number, string_to_bigint, string_to_number, CompiledMethod,
    FunctionKind, FunctionValue, Heap, Invocation, MethodEntry, MethodId, MethodRef, Numeric,
    Value,
};

// Re-export for callers that build BigInt values.
pub use num_bigint::BigInt;
