use pretty_assertions::assert_eq;

use super::*;

#[test]
fn names_round_trip() {
    for op in Operator::ALL {
        assert_eq!(Operator::from_name(op.name()), Ok(op));
    }
}

#[test]
fn inequality_is_unsupported() {
    for name in ["notEquals", "strictNotEquals", "plus", ""] {
        assert_eq!(
            name.parse::<Operator>(),
            Err(LinkError::Unsupported {
                name: name.to_string()
            })
        );
    }
}

#[test]
fn families() {
    assert_eq!(Operator::Add.family(), OperatorFamily::Arithmetic);
    assert_eq!(Operator::Ushr.family(), OperatorFamily::Bitwise);
    assert_eq!(Operator::StrictEquals.family(), OperatorFamily::Equality);
    assert_eq!(Operator::LessThanEquals.family(), OperatorFamily::Relational);
    assert_eq!(Operator::Inc.family(), OperatorFamily::Unary);
    assert_eq!(Operator::Super.family(), OperatorFamily::Super);
    assert!(Operator::GreaterThan.is_predicate());
    assert!(!Operator::Mul.is_predicate());
}

#[test]
fn family_ordinals_index_all() {
    for (i, family) in OperatorFamily::ALL.into_iter().enumerate() {
        assert_eq!(family.ordinal(), i);
    }
}
