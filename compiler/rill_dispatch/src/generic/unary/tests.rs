#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn numbers() {
    assert_eq!(neg(&[Value::number(2.0)]).unwrap(), Value::number(-2.0));
    assert_eq!(bitnot(&[Value::number(5.0)]).unwrap(), Value::number(-6.0));
    assert_eq!(inc(&[Value::number(1.5)]).unwrap(), Value::number(2.5));
    assert_eq!(dec(&[Value::string("3")]).unwrap(), Value::number(2.0));
    assert_eq!(inc(&[Value::Null]).unwrap(), Value::number(1.0));
}

#[test]
fn bigints_stay_bigints() {
    assert_eq!(neg(&[Value::bigint(2)]).unwrap(), Value::bigint(-2));
    assert_eq!(bitnot(&[Value::bigint(5)]).unwrap(), Value::bigint(-6));
    assert_eq!(inc(&[Value::bigint(-1)]).unwrap(), Value::bigint(0));
    assert_eq!(dec(&[Value::bigint(0)]).unwrap(), Value::bigint(-1));
}
