//! `neg`, `bitnot`, `inc`, `dec`.
//!
//! The operand keeps its numeric kind: BigInts stay BigInts, everything
//! else becomes a Number.

use num_bigint::BigInt;
use rill_value::{f64_to_int32, mixed_numeric_kinds, EvalResult, Numeric, Value};

use super::unary_operand;
use crate::chain::StaticTarget;
use crate::operator::Operator;

pub static NEG: StaticTarget = StaticTarget::new("neg.generic", neg);
pub static BITNOT: StaticTarget = StaticTarget::new("bitnot.generic", bitnot);
pub static INC: StaticTarget = StaticTarget::new("inc.generic", inc);
pub static DEC: StaticTarget = StaticTarget::new("dec.generic", dec);

pub fn neg(args: &[Value]) -> EvalResult {
    unary(Operator::Neg, args)
}

pub fn bitnot(args: &[Value]) -> EvalResult {
    unary(Operator::BitNot, args)
}

pub fn inc(args: &[Value]) -> EvalResult {
    unary(Operator::Inc, args)
}

pub fn dec(args: &[Value]) -> EvalResult {
    unary(Operator::Dec, args)
}

fn unary(op: Operator, args: &[Value]) -> EvalResult {
    match unary_operand(op, args)?.to_numeric()? {
        Numeric::Number(n) => Ok(Value::Number(apply_number(op, n))),
        Numeric::BigInt(b) => apply_bigint(op, &b),
    }
}

#[inline]
pub(crate) fn apply_number(op: Operator, n: f64) -> f64 {
    match op {
        Operator::Neg => -n,
        Operator::BitNot => f64::from(!f64_to_int32(n)),
        Operator::Inc => n + 1.0,
        Operator::Dec => n - 1.0,
        _ => f64::NAN,
    }
}

pub(crate) fn apply_bigint(op: Operator, b: &BigInt) -> EvalResult {
    let result = match op {
        Operator::Neg => -b,
        Operator::BitNot => -b - 1,
        Operator::Inc => b + 1,
        Operator::Dec => b - 1,
        _ => return Err(mixed_numeric_kinds(op.symbol())),
    };
    Ok(Value::bigint(result))
}

#[cfg(test)]
mod tests;
