//! `shl`, `shr`, `ushr`, `bitand`, `bitor`, `bitxor`.
//!
//! Numbers operate on their 32-bit two's-complement wrapping with shift
//! counts masked to five bits. BigInts operate on infinite two's
//! complement; `ushr` has no BigInt meaning.

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use rill_value::{
    bigint_too_large, f64_to_int32, f64_to_uint32, invalid_operand, mixed_numeric_kinds,
    EvalResult, Numeric, Value,
};

use super::{binary_operands, MAX_BIGINT_BITS};
use crate::chain::StaticTarget;
use crate::operator::Operator;

pub static SHL: StaticTarget = StaticTarget::new("shl.generic", shl);
pub static SHR: StaticTarget = StaticTarget::new("shr.generic", shr);
pub static USHR: StaticTarget = StaticTarget::new("ushr.generic", ushr);
pub static BITAND: StaticTarget = StaticTarget::new("bitand.generic", bitand);
pub static BITOR: StaticTarget = StaticTarget::new("bitor.generic", bitor);
pub static BITXOR: StaticTarget = StaticTarget::new("bitxor.generic", bitxor);

pub fn shl(args: &[Value]) -> EvalResult {
    binary(Operator::Shl, args)
}

pub fn shr(args: &[Value]) -> EvalResult {
    binary(Operator::Shr, args)
}

pub fn ushr(args: &[Value]) -> EvalResult {
    binary(Operator::Ushr, args)
}

pub fn bitand(args: &[Value]) -> EvalResult {
    binary(Operator::BitAnd, args)
}

pub fn bitor(args: &[Value]) -> EvalResult {
    binary(Operator::BitOr, args)
}

pub fn bitxor(args: &[Value]) -> EvalResult {
    binary(Operator::BitXor, args)
}

fn binary(op: Operator, args: &[Value]) -> EvalResult {
    let (left, right) = binary_operands(op, args)?;
    match (left.to_numeric()?, right.to_numeric()?) {
        (Numeric::Number(a), Numeric::Number(b)) => Ok(Value::Number(apply_number(op, a, b))),
        (Numeric::BigInt(a), Numeric::BigInt(b)) => apply_bigint(op, &a, &b),
        _ => Err(mixed_numeric_kinds(op.symbol())),
    }
}

/// Number bitwise operation for `op`.
#[inline]
pub(crate) fn apply_number(op: Operator, a: f64, b: f64) -> f64 {
    let shift = f64_to_uint32(b) & 0x1f;
    match op {
        Operator::Shl => f64::from(f64_to_int32(a).wrapping_shl(shift)),
        Operator::Shr => f64::from(f64_to_int32(a) >> shift),
        Operator::Ushr => f64::from(f64_to_uint32(a) >> shift),
        Operator::BitAnd => f64::from(f64_to_int32(a) & f64_to_int32(b)),
        Operator::BitOr => f64::from(f64_to_int32(a) | f64_to_int32(b)),
        Operator::BitXor => f64::from(f64_to_int32(a) ^ f64_to_int32(b)),
        _ => f64::NAN,
    }
}

/// BigInt bitwise operation for `op`.
pub(crate) fn apply_bigint(op: Operator, a: &BigInt, b: &BigInt) -> EvalResult {
    match op {
        Operator::Shl => shift_left(a, b),
        Operator::Shr => shift_left(a, &-b),
        Operator::BitAnd => Ok(Value::bigint(a & b)),
        Operator::BitOr => Ok(Value::bigint(a | b)),
        Operator::BitXor => Ok(Value::bigint(a ^ b)),
        _ => Err(invalid_operand(op.symbol(), "bigint")),
    }
}

/// `a * 2^n`, rounding toward negative infinity when `n` is negative.
fn shift_left(a: &BigInt, n: &BigInt) -> EvalResult {
    if a.is_zero() {
        return Ok(Value::bigint(BigInt::zero()));
    }
    let magnitude = n.abs().to_u64();
    if n.is_negative() {
        // Shifting past every bit leaves only the sign.
        return Ok(match magnitude.filter(|m| *m < a.bits()) {
            Some(m) => Value::bigint(a >> m as usize),
            None if a.is_negative() => Value::bigint(-1),
            None => Value::bigint(0),
        });
    }
    let count = magnitude
        .filter(|m| a.bits().saturating_add(*m) <= MAX_BIGINT_BITS)
        .ok_or_else(|| bigint_too_large("<<"))?;
    Ok(Value::bigint(a << count as usize))
}

#[cfg(test)]
mod tests;
