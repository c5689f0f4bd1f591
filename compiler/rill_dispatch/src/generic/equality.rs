//! `eq` and `strictEquals`.

use rill_value::{EvalResult, Value};

use super::binary_operands;
use crate::chain::StaticTarget;
use crate::operator::Operator;

pub static EQ: StaticTarget = StaticTarget::new("eq.generic", eq);
pub static STRICT_EQUALS: StaticTarget = StaticTarget::new("strictEquals.generic", strict_equals);

pub fn eq(args: &[Value]) -> EvalResult {
    let (left, right) = binary_operands(Operator::Eq, args)?;
    Ok(Value::Bool(left.loose_equals(right)))
}

pub fn strict_equals(args: &[Value]) -> EvalResult {
    let (left, right) = binary_operands(Operator::StrictEquals, args)?;
    Ok(Value::Bool(left.strict_equals(right)))
}
