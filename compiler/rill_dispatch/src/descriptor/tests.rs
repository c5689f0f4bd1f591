use pretty_assertions::assert_eq;

use super::*;

#[test]
fn call_shaped_operators_have_no_table() {
    for op in [Operator::Call, Operator::Construct, Operator::Super, Operator::Concat] {
        assert!(descriptor(op).is_none(), "{op}");
    }
}

#[test]
fn value_typed_operators_have_tables() {
    for op in Operator::ALL {
        if let Some(table) = descriptor(op) {
            assert_eq!(table.operator, op);
            assert!(table.lookup(Classification::Other).is_none());
            assert!(std::ptr::eq(generic_target(op), table.generic));
        }
    }
}

#[test]
fn table_contents() {
    let add = descriptor(Operator::Add).map(|t| t.specializations.len());
    assert_eq!(add, Some(3));
    let ushr = descriptor(Operator::Ushr);
    assert!(ushr.is_some_and(|t| t.lookup(Classification::BigInt).is_none()));
    assert!(ushr.is_some_and(|t| t.lookup(Classification::Number).is_some()));
    let lt = descriptor(Operator::LessThan);
    assert!(lt.is_some_and(|t| t.lookup(Classification::Boolean).is_none()));
    let eq = descriptor(Operator::StrictEquals);
    assert!(eq.is_some_and(|t| t.lookup(Classification::Boolean).is_some()));
    let neg = descriptor(Operator::Neg).map(|t| t.shape);
    assert_eq!(neg, Some(OperandShape::Unary));
}

#[test]
fn target_labels() {
    let sub = descriptor(Operator::Sub).and_then(|t| t.lookup(Classification::BigInt));
    assert_eq!(sub.map(|t| t.name), Some("sub.bigint"));
    assert_eq!(generic_target(Operator::Concat).name, "concat.generic");
    assert_eq!(generic_target(Operator::Call).name, "call.generic");
}
