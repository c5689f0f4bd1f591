#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use rill_value::{ErrorCategory, EvalErrorKind, ObjectRef};

use super::*;

fn n(x: f64) -> Value {
    Value::number(x)
}

fn big(x: i64) -> Value {
    Value::bigint(x)
}

#[test]
fn number_arithmetic() {
    assert_eq!(add(&[n(1.0), n(2.0)]).unwrap(), n(3.0));
    assert_eq!(sub(&[n(1.0), n(2.0)]).unwrap(), n(-1.0));
    assert_eq!(mul(&[n(1.5), n(2.0)]).unwrap(), n(3.0));
    assert_eq!(div(&[n(1.0), n(0.0)]).unwrap(), n(f64::INFINITY));
    assert_eq!(rem(&[n(-7.0), n(3.0)]).unwrap(), n(-1.0));
    assert_eq!(exp(&[n(2.0), n(10.0)]).unwrap(), n(1024.0));
    assert!(exp(&[n(1.0), n(f64::INFINITY)]).unwrap().as_number().unwrap().is_nan());
    assert_eq!(exp(&[n(f64::NAN), n(0.0)]).unwrap(), n(1.0));
}

#[test]
fn add_concatenates_strings() {
    assert_eq!(add(&[Value::string("a"), n(1.0)]).unwrap(), Value::string("a1"));
    assert_eq!(add(&[big(2), Value::string("x")]).unwrap(), Value::string("2x"));
    assert_eq!(
        add(&[Value::object(ObjectRef::new("Object")), Value::string("!")]).unwrap(),
        Value::string("[object Object]!")
    );
    assert_eq!(add(&[Value::Bool(true), n(1.0)]).unwrap(), n(2.0));
    assert!(add(&[Value::Undefined, n(1.0)]).unwrap().as_number().unwrap().is_nan());
}

#[test]
fn bigint_arithmetic() {
    assert_eq!(add(&[big(1), big(2)]).unwrap(), big(3));
    assert_eq!(div(&[big(-7), big(2)]).unwrap(), big(-3));
    assert_eq!(rem(&[big(-7), big(2)]).unwrap(), big(-1));
    assert_eq!(exp(&[big(3), big(4)]).unwrap(), big(81));
    assert_eq!(exp(&[big(-1), big(1_000_000_000_001)]).unwrap(), big(-1));
    assert_eq!(exp(&[big(5), big(0)]).unwrap(), big(1));
}

#[test]
fn bigint_range_errors() {
    let err = div(&[big(1), big(0)]).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    assert_eq!(err.category(), ErrorCategory::RangeError);
    assert_eq!(rem(&[big(1), big(0)]).unwrap_err().kind, EvalErrorKind::DivisionByZero);
    assert_eq!(exp(&[big(2), big(-1)]).unwrap_err().kind, EvalErrorKind::NegativeExponent);
    assert!(matches!(
        exp(&[big(2), big(1 << 40)]).unwrap_err().kind,
        EvalErrorKind::BigIntTooLarge { .. }
    ));
}

#[test]
fn mixed_kinds_are_rejected() {
    for f in [add, sub, mul, div, rem, exp] {
        let err = f(&[n(1.0), big(2)]).unwrap_err();
        assert!(
            matches!(err.kind, EvalErrorKind::MixedNumericKinds { .. }),
            "{err}"
        );
        assert_eq!(err.category(), ErrorCategory::TypeError);
    }
    assert!(sub(&[Value::string("5"), big(2)]).is_err());
}
