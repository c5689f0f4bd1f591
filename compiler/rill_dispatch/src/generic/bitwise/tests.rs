#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use rill_value::EvalErrorKind;

use super::*;

fn n(x: f64) -> Value {
    Value::number(x)
}

fn big(x: i64) -> Value {
    Value::bigint(x)
}

#[test]
fn number_shifts_mask_the_count() {
    assert_eq!(shl(&[n(1.0), n(33.0)]).unwrap(), n(2.0));
    assert_eq!(shl(&[n(1.0), n(31.0)]).unwrap(), n(-2_147_483_648.0));
    assert_eq!(shr(&[n(-8.0), n(1.0)]).unwrap(), n(-4.0));
    assert_eq!(ushr(&[n(-1.0), n(0.0)]).unwrap(), n(4_294_967_295.0));
    assert_eq!(ushr(&[n(-8.0), n(28.0)]).unwrap(), n(15.0));
}

#[test]
fn number_logic_uses_int32() {
    assert_eq!(bitand(&[n(5.5), n(3.0)]).unwrap(), n(1.0));
    assert_eq!(bitor(&[n(4_294_967_296.0 + 1.0), n(2.0)]).unwrap(), n(3.0));
    assert_eq!(bitxor(&[n(f64::NAN), n(7.0)]).unwrap(), n(7.0));
}

#[test]
fn bigint_bitwise() {
    assert_eq!(shl(&[big(1), big(70)]).unwrap(), Value::bigint(num_bigint::BigInt::from(1) << 70usize));
    assert_eq!(shr(&[big(-9), big(1)]).unwrap(), big(-5));
    assert_eq!(shr(&[big(-9), big(1_000)]).unwrap(), big(-1));
    assert_eq!(shr(&[big(9), big(1_000)]).unwrap(), big(0));
    assert_eq!(shl(&[big(8), big(-2)]).unwrap(), big(2));
    assert_eq!(bitand(&[big(-1), big(12)]).unwrap(), big(12));
    assert_eq!(bitor(&[big(-16), big(3)]).unwrap(), big(-13));
    assert_eq!(bitxor(&[big(6), big(3)]).unwrap(), big(5));
}

#[test]
fn bigint_unsigned_shift_is_a_type_error() {
    let err = ushr(&[big(1), big(1)]).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::InvalidOperand { .. }));
}

#[test]
fn oversized_bigint_shift() {
    assert!(matches!(
        shl(&[big(1), big(1 << 40)]).unwrap_err().kind,
        EvalErrorKind::BigIntTooLarge { .. }
    ));
    assert_eq!(shl(&[big(0), big(1 << 40)]).unwrap(), big(0));
}

#[test]
fn mixed_kinds_are_rejected() {
    for f in [shl, shr, ushr, bitand, bitor, bitxor] {
        assert!(matches!(
            f(&[big(1), n(1.0)]).unwrap_err().kind,
            EvalErrorKind::MixedNumericKinds { .. }
        ));
    }
}
