use super::*;

#[test]
fn zero_is_the_only_leading_zero_index() {
    assert_eq!(to_index("0"), Some(0));
    assert_eq!(to_index("00"), None);
    assert_eq!(to_index("01"), None);
    assert_eq!(to_index("0x1"), None);
}

#[test]
fn limit_is_exclusive() {
    assert_eq!(to_index("9007199254740991"), None);
    assert_eq!(to_index("9007199254740990"), Some(9_007_199_254_740_990));
    assert_eq!(to_index("9007199254740992"), None);
    assert_eq!(to_index("99999999999999999999"), None);
}

#[test]
fn rejects_non_canonical_text() {
    for key in ["", "-1", "+1", " 1", "1 ", "1e3", "1.0", "length", "１"] {
        assert_eq!(to_index(key), None, "{key:?} is not an index");
    }
}

#[test]
fn accepts_plain_decimals() {
    assert_eq!(to_index("7"), Some(7));
    assert_eq!(to_index("4294967295"), Some(4_294_967_295));
    assert_eq!(to_index("4294967296"), Some(4_294_967_296));
}

#[test]
fn integer_domains() {
    assert!(is_index_32(0));
    assert!(is_index_32(i32::MAX));
    assert!(!is_index_32(-1));

    assert!(is_index_64(0));
    assert!(is_index_64(9_007_199_254_740_990));
    assert!(!is_index_64(9_007_199_254_740_991));
    assert!(!is_index_64(-1));
    assert!(!is_index_64(i64::MIN));
}

#[test]
fn numeric_keys() {
    assert_eq!(index_from_number(0.0), Some(0));
    assert_eq!(index_from_number(-0.0), Some(0));
    assert_eq!(index_from_number(42.0), Some(42));
    assert_eq!(index_from_number(9_007_199_254_740_990.0), Some(9_007_199_254_740_990));
    assert_eq!(index_from_number(9_007_199_254_740_991.0), None);
    assert_eq!(index_from_number(1.5), None);
    assert_eq!(index_from_number(-1.0), None);
    assert_eq!(index_from_number(f64::NAN), None);
    assert_eq!(index_from_number(f64::INFINITY), None);
}
