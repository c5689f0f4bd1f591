//! `add`, `sub`, `mul`, `div`, `mod`, `exp`.
//!
//! `add` concatenates when either primitive operand is a string. Every
//! other case converts both operands to numerics and requires them to be
//! of the same kind: a Number and a BigInt never combine.

use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};
use rill_value::{
    bigint_too_large, division_by_zero, mixed_numeric_kinds, negative_exponent, EvalError, EvalResult,
    Numeric, Value,
};

use super::{binary_operands, MAX_BIGINT_BITS};
use crate::chain::StaticTarget;
use crate::operator::Operator;

pub static ADD: StaticTarget = StaticTarget::new("add.generic", add);
pub static SUB: StaticTarget = StaticTarget::new("sub.generic", sub);
pub static MUL: StaticTarget = StaticTarget::new("mul.generic", mul);
pub static DIV: StaticTarget = StaticTarget::new("div.generic", div);
pub static MOD: StaticTarget = StaticTarget::new("mod.generic", rem);
pub static EXP: StaticTarget = StaticTarget::new("exp.generic", exp);

pub fn add(args: &[Value]) -> EvalResult {
    let (left, right) = binary_operands(Operator::Add, args)?;
    let left = left.to_primitive();
    let right = right.to_primitive();
    if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) {
        let mut out = left.to_display_string();
        out.push_str(&right.to_display_string());
        return Ok(Value::string(out));
    }
    numeric(Operator::Add, &left, &right)
}

pub fn sub(args: &[Value]) -> EvalResult {
    binary(Operator::Sub, args)
}

pub fn mul(args: &[Value]) -> EvalResult {
    binary(Operator::Mul, args)
}

pub fn div(args: &[Value]) -> EvalResult {
    binary(Operator::Div, args)
}

pub fn rem(args: &[Value]) -> EvalResult {
    binary(Operator::Mod, args)
}

pub fn exp(args: &[Value]) -> EvalResult {
    binary(Operator::Exp, args)
}

fn binary(op: Operator, args: &[Value]) -> EvalResult {
    let (left, right) = binary_operands(op, args)?;
    numeric(op, left, right)
}

fn numeric(op: Operator, left: &Value, right: &Value) -> EvalResult {
    match (left.to_numeric()?, right.to_numeric()?) {
        (Numeric::Number(a), Numeric::Number(b)) => Ok(Value::Number(apply_number(op, a, b))),
        (Numeric::BigInt(a), Numeric::BigInt(b)) => apply_bigint(op, &a, &b),
        _ => Err(mixed_numeric_kinds(op.symbol())),
    }
}

/// Number arithmetic for `op`.
#[inline]
pub(crate) fn apply_number(op: Operator, a: f64, b: f64) -> f64 {
    match op {
        Operator::Add => a + b,
        Operator::Sub => a - b,
        Operator::Mul => a * b,
        Operator::Div => a / b,
        // Truncated remainder, sign of the dividend.
        Operator::Mod => a % b,
        Operator::Exp => number_pow(a, b),
        _ => f64::NAN,
    }
}

fn number_pow(base: f64, exponent: f64) -> f64 {
    if exponent.is_nan() || (base.abs() == 1.0 && exponent.is_infinite()) {
        return f64::NAN;
    }
    base.powf(exponent)
}

/// BigInt arithmetic for `op`.
pub(crate) fn apply_bigint(op: Operator, a: &BigInt, b: &BigInt) -> EvalResult {
    let result = match op {
        Operator::Add => a + b,
        Operator::Sub => a - b,
        Operator::Mul => a * b,
        Operator::Div => {
            if b.is_zero() {
                return Err(division_by_zero());
            }
            a / b
        }
        Operator::Mod => {
            if b.is_zero() {
                return Err(division_by_zero());
            }
            a % b
        }
        Operator::Exp => bigint_pow(a, b)?,
        _ => return Err(mixed_numeric_kinds(op.symbol())),
    };
    Ok(Value::bigint(result))
}

fn bigint_pow(base: &BigInt, exponent: &BigInt) -> Result<BigInt, EvalError> {
    if exponent.is_negative() {
        return Err(negative_exponent());
    }
    if exponent.is_zero() {
        return Ok(BigInt::one());
    }
    if base.is_zero() || base.is_one() {
        return Ok(base.clone());
    }
    if *base == -BigInt::one() {
        let odd = !(exponent % 2u32).is_zero();
        return Ok(if odd { base.clone() } else { BigInt::one() });
    }
    let exponent = exponent
        .to_u64()
        .filter(|e| base.bits().saturating_mul(*e) <= MAX_BIGINT_BITS)
        .ok_or_else(|| bigint_too_large("**"))?;
    // Bounded by MAX_BIGINT_BITS above, so the exponent fits in u32.
    Ok(base.pow(exponent as u32))
}

#[cfg(test)]
mod tests;
