//! Generic fallbacks: full language semantics for every operand type.
//!
//! Each operator has exactly one generic target. It is what a site runs
//! when nothing was specialized, what the relink-to-generic branch
//! installs, and the reference the specialized targets must agree with.

pub mod arithmetic;
pub mod bitwise;
pub mod equality;
pub mod relational;
pub mod unary;

use rill_value::{arity_mismatch, EvalError, Value};

use crate::operator::Operator;

/// Largest BigInt result, in bits, that an operator may produce.
pub const MAX_BIGINT_BITS: u64 = 1 << 30;

/// Split a binary operand slice.
#[inline]
pub(crate) fn binary_operands(op: Operator, args: &[Value]) -> Result<(&Value, &Value), EvalError> {
    match args {
        [left, right] => Ok((left, right)),
        _ => Err(arity_mismatch(op.name(), 2, args.len())),
    }
}

/// Split a unary operand slice.
#[inline]
pub(crate) fn unary_operand(op: Operator, args: &[Value]) -> Result<&Value, EvalError> {
    match args {
        [operand] => Ok(operand),
        _ => Err(arity_mismatch(op.name(), 1, args.len())),
    }
}
