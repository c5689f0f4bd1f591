#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn keywords() {
    assert_eq!(parse_operand("undefined"), Ok(Value::Undefined));
    assert_eq!(parse_operand("null"), Ok(Value::Null));
    assert_eq!(parse_operand("true"), Ok(Value::boolean(true)));
    assert_eq!(parse_operand("false"), Ok(Value::boolean(false)));
    assert_eq!(parse_operand("NaN"), Ok(Value::number(f64::NAN)));
}

#[test]
fn numbers() {
    assert_eq!(parse_operand("12"), Ok(Value::number(12.0)));
    assert_eq!(parse_operand("-1.5"), Ok(Value::number(-1.5)));
    assert_eq!(parse_operand("0x1f"), Ok(Value::number(31.0)));
    assert_eq!(parse_operand("1e3"), Ok(Value::number(1000.0)));
    assert_eq!(parse_operand("-Infinity"), Ok(Value::number(f64::NEG_INFINITY)));
}

#[test]
fn bigints() {
    assert_eq!(parse_operand("7n"), Ok(Value::bigint(7)));
    assert_eq!(parse_operand("-12n"), Ok(Value::bigint(-12)));
    assert_eq!(parse_operand("0x10n"), Ok(Value::bigint(16)));
    assert_eq!(parse_operand("-0x10n"), Ok(Value::bigint(-16)));
    assert!(parse_operand("1.5n").is_err());
    assert!(parse_operand("n").is_err());
    assert!(parse_operand("-n").is_err());
}

#[test]
fn strings() {
    assert_eq!(parse_operand("\"text\""), Ok(Value::string("text")));
    assert_eq!(parse_operand("'12'"), Ok(Value::string("12")));
    assert_eq!(parse_operand("\"\""), Ok(Value::string("")));
}

#[test]
fn functions() {
    let value = parse_operand("@identity").unwrap();
    assert_eq!(value.as_function().unwrap().name(), "identity");
    let err = parse_operand("@nope").unwrap_err();
    assert!(err.contains("@identity"));
}

#[test]
fn bare_words_are_rejected() {
    let err = parse_operand("hello").unwrap_err();
    assert!(err.contains("quote strings"));
    assert!(parse_operand("").is_err());
}

#[test]
fn operand_lists() {
    let values = parse_operands(&["1", "2n", "'x'"]).unwrap();
    assert_eq!(
        values,
        vec![Value::number(1.0), Value::bigint(2), Value::string("x")]
    );
    assert!(parse_operands(&["1", "oops"]).is_err());
}
