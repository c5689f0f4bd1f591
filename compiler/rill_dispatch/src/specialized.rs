//! Specialized targets.
//!
//! Each target assumes the classification its guard established and goes
//! straight to the operation kernel. If it is somehow reached with other
//! operands it defers to the operator's generic target, so a specialized
//! target can never produce a different answer than the generic one.

use rill_value::{compare_strings, EvalResult, Value};

use crate::chain::StaticTarget;
use crate::generic::{arithmetic, bitwise, equality, relational, unary};
use crate::operator::Operator;

/// Define a specialized `StaticTarget` from a slice pattern.
macro_rules! specialize {
    ($target:ident, $label:expr, $pattern:pat => $body:expr, else $generic:path) => {
        pub static $target: StaticTarget = StaticTarget::new($label, {
            fn run(args: &[Value]) -> EvalResult {
                match args {
                    $pattern => $body,
                    _ => $generic(args),
                }
            }
            run
        });
    };
}

/// Number and BigInt targets for a binary operator with `apply_*` kernels.
macro_rules! numeric_pair {
    ($number:ident, $bigint:ident, $name:literal, $op:expr, $kernel:ident::$generic:ident) => {
        specialize!(
            $number,
            concat!($name, ".number"),
            [Value::Number(a), Value::Number(b)] => Ok(Value::Number($kernel::apply_number($op, *a, *b))),
            else $kernel::$generic
        );
        specialize!(
            $bigint,
            concat!($name, ".bigint"),
            [Value::BigInt(a), Value::BigInt(b)] => $kernel::apply_bigint($op, a, b),
            else $kernel::$generic
        );
    };
}

/// Number and BigInt targets for a unary operator.
macro_rules! numeric_unary {
    ($number:ident, $bigint:ident, $name:literal, $op:expr, $generic:ident) => {
        specialize!(
            $number,
            concat!($name, ".number"),
            [Value::Number(n)] => Ok(Value::Number(unary::apply_number($op, *n))),
            else unary::$generic
        );
        specialize!(
            $bigint,
            concat!($name, ".bigint"),
            [Value::BigInt(n)] => unary::apply_bigint($op, n),
            else unary::$generic
        );
    };
}

/// String, Number and BigInt targets for a relational operator.
macro_rules! relational {
    ($string:ident, $number:ident, $bigint:ident, $name:literal, $op:expr, $generic:ident) => {
        specialize!(
            $string,
            concat!($name, ".string"),
            [Value::Str(a), Value::Str(b)] => Ok(Value::Bool(relational::holds($op, Some(compare_strings(a, b))))),
            else relational::$generic
        );
        specialize!(
            $number,
            concat!($name, ".number"),
            [Value::Number(a), Value::Number(b)] => Ok(Value::Bool(relational::holds($op, a.partial_cmp(b)))),
            else relational::$generic
        );
        specialize!(
            $bigint,
            concat!($name, ".bigint"),
            [Value::BigInt(a), Value::BigInt(b)] => Ok(Value::Bool(relational::holds($op, Some((**a).cmp(&**b))))),
            else relational::$generic
        );
    };
}

/// Same-type equality targets; loose and strict agree when types match.
macro_rules! equality {
    ($string:ident, $number:ident, $bigint:ident, $boolean:ident, $name:literal, $generic:ident) => {
        specialize!(
            $string,
            concat!($name, ".string"),
            [Value::Str(a), Value::Str(b)] => Ok(Value::Bool(a == b)),
            else equality::$generic
        );
        specialize!(
            $number,
            concat!($name, ".number"),
            [Value::Number(a), Value::Number(b)] => Ok(Value::Bool(a == b)),
            else equality::$generic
        );
        specialize!(
            $bigint,
            concat!($name, ".bigint"),
            [Value::BigInt(a), Value::BigInt(b)] => Ok(Value::Bool(a == b)),
            else equality::$generic
        );
        specialize!(
            $boolean,
            concat!($name, ".boolean"),
            [Value::Bool(a), Value::Bool(b)] => Ok(Value::Bool(a == b)),
            else equality::$generic
        );
    };
}

// Arithmetic

specialize!(
    ADD_STRING,
    "add.string",
    [Value::Str(a), Value::Str(b)] => {
        let mut out = String::with_capacity(a.len() + b.len());
        out.push_str(a);
        out.push_str(b);
        Ok(Value::string(out))
    },
    else arithmetic::add
);
numeric_pair!(ADD_NUMBER, ADD_BIGINT, "add", Operator::Add, arithmetic::add);
numeric_pair!(SUB_NUMBER, SUB_BIGINT, "sub", Operator::Sub, arithmetic::sub);
numeric_pair!(MUL_NUMBER, MUL_BIGINT, "mul", Operator::Mul, arithmetic::mul);
numeric_pair!(DIV_NUMBER, DIV_BIGINT, "div", Operator::Div, arithmetic::div);
numeric_pair!(MOD_NUMBER, MOD_BIGINT, "mod", Operator::Mod, arithmetic::rem);
numeric_pair!(EXP_NUMBER, EXP_BIGINT, "exp", Operator::Exp, arithmetic::exp);

// Bitwise

numeric_pair!(SHL_NUMBER, SHL_BIGINT, "shl", Operator::Shl, bitwise::shl);
numeric_pair!(SHR_NUMBER, SHR_BIGINT, "shr", Operator::Shr, bitwise::shr);
numeric_pair!(BITAND_NUMBER, BITAND_BIGINT, "bitand", Operator::BitAnd, bitwise::bitand);
numeric_pair!(BITOR_NUMBER, BITOR_BIGINT, "bitor", Operator::BitOr, bitwise::bitor);
numeric_pair!(BITXOR_NUMBER, BITXOR_BIGINT, "bitxor", Operator::BitXor, bitwise::bitxor);
specialize!(
    USHR_NUMBER,
    "ushr.number",
    [Value::Number(a), Value::Number(b)] => Ok(Value::Number(bitwise::apply_number(Operator::Ushr, *a, *b))),
    else bitwise::ushr
);

// Equality

equality!(EQ_STRING, EQ_NUMBER, EQ_BIGINT, EQ_BOOLEAN, "eq", eq);
equality!(
    STRICT_EQUALS_STRING,
    STRICT_EQUALS_NUMBER,
    STRICT_EQUALS_BIGINT,
    STRICT_EQUALS_BOOLEAN,
    "strictEquals",
    strict_equals
);

// Relational

relational!(
    LESS_THAN_STRING,
    LESS_THAN_NUMBER,
    LESS_THAN_BIGINT,
    "lessThan",
    Operator::LessThan,
    less_than
);
relational!(
    GREATER_THAN_STRING,
    GREATER_THAN_NUMBER,
    GREATER_THAN_BIGINT,
    "greaterThan",
    Operator::GreaterThan,
    greater_than
);
relational!(
    LESS_THAN_EQUALS_STRING,
    LESS_THAN_EQUALS_NUMBER,
    LESS_THAN_EQUALS_BIGINT,
    "lessThanEquals",
    Operator::LessThanEquals,
    less_than_equals
);
relational!(
    GREATER_THAN_EQUALS_STRING,
    GREATER_THAN_EQUALS_NUMBER,
    GREATER_THAN_EQUALS_BIGINT,
    "greaterThanEquals",
    Operator::GreaterThanEquals,
    greater_than_equals
);

// Unary

numeric_unary!(NEG_NUMBER, NEG_BIGINT, "neg", Operator::Neg, neg);
numeric_unary!(BITNOT_NUMBER, BITNOT_BIGINT, "bitnot", Operator::BitNot, bitnot);
numeric_unary!(INC_NUMBER, INC_BIGINT, "inc", Operator::Inc, inc);
numeric_unary!(DEC_NUMBER, DEC_BIGINT, "dec", Operator::Dec, dec);
