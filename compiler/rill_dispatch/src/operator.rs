//! Operator names and families.
//!
//! The set of linkable operators is fixed. `notEquals` and
//! `strictNotEquals` are not in it: callers negate `eq` / `strictEquals`.

use std::fmt;
use std::str::FromStr;

use crate::LinkError;

/// A linkable operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Call,
    Construct,
    Super,
    Concat,

    Add,
    Sub,
    Exp,
    Mul,
    Div,
    Mod,

    Shl,
    Shr,
    Ushr,
    BitAnd,
    BitOr,
    BitXor,

    Eq,
    StrictEquals,

    LessThan,
    GreaterThan,
    LessThanEquals,
    GreaterThanEquals,

    BitNot,
    Neg,
    Inc,
    Dec,
}

/// Operators grouped by calling convention and failure isolation.
///
/// Each family owns one terminal target, so exhaustion while linking an
/// `add` site never touches a `call` site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperatorFamily {
    Call,
    Construct,
    Super,
    Concat,
    Arithmetic,
    Bitwise,
    Equality,
    Relational,
    Unary,
}

impl OperatorFamily {
    pub const ALL: [OperatorFamily; 9] = [
        OperatorFamily::Call,
        OperatorFamily::Construct,
        OperatorFamily::Super,
        OperatorFamily::Concat,
        OperatorFamily::Arithmetic,
        OperatorFamily::Bitwise,
        OperatorFamily::Equality,
        OperatorFamily::Relational,
        OperatorFamily::Unary,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OperatorFamily::Call => "call",
            OperatorFamily::Construct => "construct",
            OperatorFamily::Super => "super",
            OperatorFamily::Concat => "concat",
            OperatorFamily::Arithmetic => "arithmetic",
            OperatorFamily::Bitwise => "bitwise",
            OperatorFamily::Equality => "equality",
            OperatorFamily::Relational => "relational",
            OperatorFamily::Unary => "unary",
        }
    }

    /// Position in `ALL`.
    pub(crate) fn ordinal(self) -> usize {
        self as usize
    }
}

impl fmt::Display for OperatorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Operator {
    pub const ALL: [Operator; 26] = [
        Operator::Call,
        Operator::Construct,
        Operator::Super,
        Operator::Concat,
        Operator::Add,
        Operator::Sub,
        Operator::Exp,
        Operator::Mul,
        Operator::Div,
        Operator::Mod,
        Operator::Shl,
        Operator::Shr,
        Operator::Ushr,
        Operator::BitAnd,
        Operator::BitOr,
        Operator::BitXor,
        Operator::Eq,
        Operator::StrictEquals,
        Operator::LessThan,
        Operator::GreaterThan,
        Operator::LessThanEquals,
        Operator::GreaterThanEquals,
        Operator::BitNot,
        Operator::Neg,
        Operator::Inc,
        Operator::Dec,
    ];

    /// Look up an operator by its linkage name.
    pub fn from_name(name: &str) -> Result<Self, LinkError> {
        Operator::ALL
            .into_iter()
            .find(|op| op.name() == name)
            .ok_or_else(|| LinkError::Unsupported {
                name: name.to_string(),
            })
    }

    /// Linkage name.
    pub fn name(self) -> &'static str {
        match self {
            Operator::Call => "call",
            Operator::Construct => "construct",
            Operator::Super => "super",
            Operator::Concat => "concat",
            Operator::Add => "add",
            Operator::Sub => "sub",
            Operator::Exp => "exp",
            Operator::Mul => "mul",
            Operator::Div => "div",
            Operator::Mod => "mod",
            Operator::Shl => "shl",
            Operator::Shr => "shr",
            Operator::Ushr => "ushr",
            Operator::BitAnd => "bitand",
            Operator::BitOr => "bitor",
            Operator::BitXor => "bitxor",
            Operator::Eq => "eq",
            Operator::StrictEquals => "strictEquals",
            Operator::LessThan => "lessThan",
            Operator::GreaterThan => "greaterThan",
            Operator::LessThanEquals => "lessThanEquals",
            Operator::GreaterThanEquals => "greaterThanEquals",
            Operator::BitNot => "bitnot",
            Operator::Neg => "neg",
            Operator::Inc => "inc",
            Operator::Dec => "dec",
        }
    }

    /// Source-level spelling, used in error messages.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Call => "call",
            Operator::Construct => "new",
            Operator::Super => "super",
            Operator::Concat => "template concatenation",
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Exp => "**",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Mod => "%",
            Operator::Shl => "<<",
            Operator::Shr => ">>",
            Operator::Ushr => ">>>",
            Operator::BitAnd => "&",
            Operator::BitOr => "|",
            Operator::BitXor => "^",
            Operator::Eq => "==",
            Operator::StrictEquals => "===",
            Operator::LessThan => "<",
            Operator::GreaterThan => ">",
            Operator::LessThanEquals => "<=",
            Operator::GreaterThanEquals => ">=",
            Operator::BitNot => "~",
            Operator::Neg => "unary -",
            Operator::Inc => "++",
            Operator::Dec => "--",
        }
    }

    pub fn family(self) -> OperatorFamily {
        match self {
            Operator::Call => OperatorFamily::Call,
            Operator::Construct => OperatorFamily::Construct,
            Operator::Super => OperatorFamily::Super,
            Operator::Concat => OperatorFamily::Concat,
            Operator::Add
            | Operator::Sub
            | Operator::Exp
            | Operator::Mul
            | Operator::Div
            | Operator::Mod => OperatorFamily::Arithmetic,
            Operator::Shl
            | Operator::Shr
            | Operator::Ushr
            | Operator::BitAnd
            | Operator::BitOr
            | Operator::BitXor => OperatorFamily::Bitwise,
            Operator::Eq | Operator::StrictEquals => OperatorFamily::Equality,
            Operator::LessThan
            | Operator::GreaterThan
            | Operator::LessThanEquals
            | Operator::GreaterThanEquals => OperatorFamily::Relational,
            Operator::BitNot | Operator::Neg | Operator::Inc | Operator::Dec => {
                OperatorFamily::Unary
            }
        }
    }

    /// Whether the operator produces a boolean.
    pub fn is_predicate(self) -> bool {
        matches!(
            self.family(),
            OperatorFamily::Equality | OperatorFamily::Relational
        )
    }
}

impl FromStr for Operator {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::from_name(s)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests;
