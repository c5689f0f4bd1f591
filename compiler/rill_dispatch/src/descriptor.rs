//! Specialization descriptors.
//!
//! One immutable table per value-typed operator, mapping a classification
//! to its specialized target, plus the operator's shared generic target.
//! `call`, `construct`, `super` and `concat` specialize on call shape and
//! have no table.

use crate::chain::StaticTarget;
use crate::generic::{arithmetic, bitwise, equality, relational, unary};
use crate::lattice::Classification;
use crate::operator::Operator;
use crate::specialized as s;
use crate::{concat, invoke};

/// Operand count of a value-typed operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandShape {
    Unary,
    Binary,
}

/// One row of a descriptor table.
#[derive(Debug)]
pub struct Specialization {
    pub classification: Classification,
    pub target: &'static StaticTarget,
}

/// Specialization table of one operator.
#[derive(Debug)]
pub struct Descriptor {
    pub operator: Operator,
    pub shape: OperandShape,
    pub specializations: &'static [Specialization],
    pub generic: &'static StaticTarget,
}

impl Descriptor {
    /// The specialized target for `classification`, if any.
    pub fn lookup(&self, classification: Classification) -> Option<&'static StaticTarget> {
        self.specializations
            .iter()
            .find(|row| row.classification == classification)
            .map(|row| row.target)
    }
}

macro_rules! descriptor {
    ($name:ident, $op:ident, $shape:ident, $generic:expr, [$($class:ident => $target:ident),* $(,)?]) => {
        static $name: Descriptor = Descriptor {
            operator: Operator::$op,
            shape: OperandShape::$shape,
            specializations: &[$(Specialization {
                classification: Classification::$class,
                target: &s::$target,
            }),*],
            generic: &$generic,
        };
    };
}

descriptor!(ADD, Add, Binary, arithmetic::ADD, [
    Number => ADD_NUMBER,
    BigInt => ADD_BIGINT,
    String => ADD_STRING,
]);
descriptor!(SUB, Sub, Binary, arithmetic::SUB, [Number => SUB_NUMBER, BigInt => SUB_BIGINT]);
descriptor!(MUL, Mul, Binary, arithmetic::MUL, [Number => MUL_NUMBER, BigInt => MUL_BIGINT]);
descriptor!(DIV, Div, Binary, arithmetic::DIV, [Number => DIV_NUMBER, BigInt => DIV_BIGINT]);
descriptor!(MOD, Mod, Binary, arithmetic::MOD, [Number => MOD_NUMBER, BigInt => MOD_BIGINT]);
descriptor!(EXP, Exp, Binary, arithmetic::EXP, [Number => EXP_NUMBER, BigInt => EXP_BIGINT]);

descriptor!(SHL, Shl, Binary, bitwise::SHL, [Number => SHL_NUMBER, BigInt => SHL_BIGINT]);
descriptor!(SHR, Shr, Binary, bitwise::SHR, [Number => SHR_NUMBER, BigInt => SHR_BIGINT]);
descriptor!(USHR, Ushr, Binary, bitwise::USHR, [Number => USHR_NUMBER]);
descriptor!(BITAND, BitAnd, Binary, bitwise::BITAND, [
    Number => BITAND_NUMBER,
    BigInt => BITAND_BIGINT,
]);
descriptor!(BITOR, BitOr, Binary, bitwise::BITOR, [
    Number => BITOR_NUMBER,
    BigInt => BITOR_BIGINT,
]);
descriptor!(BITXOR, BitXor, Binary, bitwise::BITXOR, [
    Number => BITXOR_NUMBER,
    BigInt => BITXOR_BIGINT,
]);

descriptor!(EQ, Eq, Binary, equality::EQ, [
    String => EQ_STRING,
    Number => EQ_NUMBER,
    BigInt => EQ_BIGINT,
    Boolean => EQ_BOOLEAN,
]);
descriptor!(STRICT_EQUALS, StrictEquals, Binary, equality::STRICT_EQUALS, [
    String => STRICT_EQUALS_STRING,
    Number => STRICT_EQUALS_NUMBER,
    BigInt => STRICT_EQUALS_BIGINT,
    Boolean => STRICT_EQUALS_BOOLEAN,
]);

descriptor!(LESS_THAN, LessThan, Binary, relational::LESS_THAN, [
    String => LESS_THAN_STRING,
    Number => LESS_THAN_NUMBER,
    BigInt => LESS_THAN_BIGINT,
]);
descriptor!(GREATER_THAN, GreaterThan, Binary, relational::GREATER_THAN, [
    String => GREATER_THAN_STRING,
    Number => GREATER_THAN_NUMBER,
    BigInt => GREATER_THAN_BIGINT,
]);
descriptor!(LESS_THAN_EQUALS, LessThanEquals, Binary, relational::LESS_THAN_EQUALS, [
    String => LESS_THAN_EQUALS_STRING,
    Number => LESS_THAN_EQUALS_NUMBER,
    BigInt => LESS_THAN_EQUALS_BIGINT,
]);
descriptor!(GREATER_THAN_EQUALS, GreaterThanEquals, Binary, relational::GREATER_THAN_EQUALS, [
    String => GREATER_THAN_EQUALS_STRING,
    Number => GREATER_THAN_EQUALS_NUMBER,
    BigInt => GREATER_THAN_EQUALS_BIGINT,
]);

descriptor!(NEG, Neg, Unary, unary::NEG, [Number => NEG_NUMBER, BigInt => NEG_BIGINT]);
descriptor!(BITNOT, BitNot, Unary, unary::BITNOT, [Number => BITNOT_NUMBER, BigInt => BITNOT_BIGINT]);
descriptor!(INC, Inc, Unary, unary::INC, [Number => INC_NUMBER, BigInt => INC_BIGINT]);
descriptor!(DEC, Dec, Unary, unary::DEC, [Number => DEC_NUMBER, BigInt => DEC_BIGINT]);

/// The descriptor of a value-typed operator.
pub fn descriptor(op: Operator) -> Option<&'static Descriptor> {
    let table = match op {
        Operator::Call | Operator::Construct | Operator::Super | Operator::Concat => return None,
        Operator::Add => &ADD,
        Operator::Sub => &SUB,
        Operator::Mul => &MUL,
        Operator::Div => &DIV,
        Operator::Mod => &MOD,
        Operator::Exp => &EXP,
        Operator::Shl => &SHL,
        Operator::Shr => &SHR,
        Operator::Ushr => &USHR,
        Operator::BitAnd => &BITAND,
        Operator::BitOr => &BITOR,
        Operator::BitXor => &BITXOR,
        Operator::Eq => &EQ,
        Operator::StrictEquals => &STRICT_EQUALS,
        Operator::LessThan => &LESS_THAN,
        Operator::GreaterThan => &GREATER_THAN,
        Operator::LessThanEquals => &LESS_THAN_EQUALS,
        Operator::GreaterThanEquals => &GREATER_THAN_EQUALS,
        Operator::Neg => &NEG,
        Operator::BitNot => &BITNOT,
        Operator::Inc => &INC,
        Operator::Dec => &DEC,
    };
    Some(table)
}

/// The generic target of any operator.
pub fn generic_target(op: Operator) -> &'static StaticTarget {
    if let Some(table) = descriptor(op) {
        return table.generic;
    }
    match op {
        Operator::Call => &invoke::GENERIC_CALL,
        Operator::Construct => &invoke::GENERIC_CONSTRUCT,
        Operator::Super => &invoke::GENERIC_SUPER,
        // Concat is the only remaining operator without a table.
        _ => &concat::GENERIC,
    }
}

#[cfg(test)]
mod tests;
