//! `lessThan`, `greaterThan`, `lessThanEquals`, `greaterThanEquals`.
//!
//! All four derive from one three-way comparison. An unordered result
//! (NaN, or a string that is not a BigInt literal) makes every one of them
//! `false`.

use std::cmp::Ordering;

use rill_value::{EvalResult, Value};

use super::binary_operands;
use crate::chain::StaticTarget;
use crate::operator::Operator;

pub static LESS_THAN: StaticTarget = StaticTarget::new("lessThan.generic", less_than);
pub static GREATER_THAN: StaticTarget = StaticTarget::new("greaterThan.generic", greater_than);
pub static LESS_THAN_EQUALS: StaticTarget =
    StaticTarget::new("lessThanEquals.generic", less_than_equals);
pub static GREATER_THAN_EQUALS: StaticTarget =
    StaticTarget::new("greaterThanEquals.generic", greater_than_equals);

pub fn less_than(args: &[Value]) -> EvalResult {
    compare(Operator::LessThan, args)
}

pub fn greater_than(args: &[Value]) -> EvalResult {
    compare(Operator::GreaterThan, args)
}

pub fn less_than_equals(args: &[Value]) -> EvalResult {
    compare(Operator::LessThanEquals, args)
}

pub fn greater_than_equals(args: &[Value]) -> EvalResult {
    compare(Operator::GreaterThanEquals, args)
}

fn compare(op: Operator, args: &[Value]) -> EvalResult {
    let (left, right) = binary_operands(op, args)?;
    Ok(Value::Bool(holds(op, left.compare(right))))
}

/// Whether `op` holds for a three-way comparison result.
#[inline]
pub(crate) fn holds(op: Operator, ordering: Option<Ordering>) -> bool {
    match (op, ordering) {
        (_, None) => false,
        (Operator::LessThan, Some(o)) => o == Ordering::Less,
        (Operator::GreaterThan, Some(o)) => o == Ordering::Greater,
        (Operator::LessThanEquals, Some(o)) => o != Ordering::Greater,
        (Operator::GreaterThanEquals, Some(o)) => o != Ordering::Less,
        _ => false,
    }
}
