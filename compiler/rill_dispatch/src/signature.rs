//! Call signatures: the parameter and return shape of a linkage request.
//!
//! The shape is checked once at link time against the operator's calling
//! convention, and the argument count is checked on every invocation.

use std::fmt;

use smallvec::SmallVec;

use crate::operator::{Operator, OperatorFamily};
use crate::LinkError;

/// Highest concat arity with its own fixed-arity signature and target.
pub const CONCAT_MAX_ARITY: usize = 10;

/// Shape of one parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Any value.
    Value,
    /// A string-like value (concat operands).
    StringLike,
    /// Trailing variable-length sequence of string-like values.
    Rest,
}

/// Shape of the result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReturnKind {
    Value,
    Boolean,
    String,
}

/// Ordered parameter shapes plus a return shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CallSignature {
    params: SmallVec<[ParamKind; 4]>,
    returns: ReturnKind,
}

impl CallSignature {
    pub fn new(params: impl IntoIterator<Item = ParamKind>, returns: ReturnKind) -> Self {
        CallSignature {
            params: params.into_iter().collect(),
            returns,
        }
    }

    /// `(value) -> value`
    pub fn unary() -> Self {
        Self::new([ParamKind::Value], ReturnKind::Value)
    }

    /// `(value, value) -> value`
    pub fn binary() -> Self {
        Self::new([ParamKind::Value; 2], ReturnKind::Value)
    }

    /// `(value, value) -> boolean`
    pub fn predicate() -> Self {
        Self::new([ParamKind::Value; 2], ReturnKind::Boolean)
    }

    /// `(callee, this, args..argc) -> value`
    pub fn call(argc: usize) -> Self {
        Self::new(
            std::iter::repeat(ParamKind::Value).take(argc + 2),
            ReturnKind::Value,
        )
    }

    /// `(callee, args..argc) -> value`
    pub fn construct(argc: usize) -> Self {
        Self::new(
            std::iter::repeat(ParamKind::Value).take(argc + 1),
            ReturnKind::Value,
        )
    }

    /// `(parent_constructor, this, args..argc) -> value`
    pub fn super_call(argc: usize) -> Self {
        Self::call(argc)
    }

    /// Concat signature for `arity` operands.
    ///
    /// Up to [`CONCAT_MAX_ARITY`] every operand is its own string-like
    /// parameter; beyond that the fixed parameters stop at the ceiling and
    /// the remainder is collected into one rest parameter.
    pub fn concat(arity: usize) -> Self {
        let mut params: SmallVec<[ParamKind; 4]> = std::iter::repeat(ParamKind::StringLike)
            .take(arity.min(CONCAT_MAX_ARITY))
            .collect();
        if arity > CONCAT_MAX_ARITY {
            params.push(ParamKind::Rest);
        }
        CallSignature {
            params,
            returns: ReturnKind::String,
        }
    }

    /// The conventional signature of `operator` with `argc` call arguments.
    ///
    /// `argc` is ignored by operators with a fixed operand count.
    pub fn for_operator(operator: Operator, argc: usize) -> Self {
        match operator.family() {
            OperatorFamily::Call => Self::call(argc),
            OperatorFamily::Construct => Self::construct(argc),
            OperatorFamily::Super => Self::super_call(argc),
            OperatorFamily::Concat => Self::concat(argc),
            OperatorFamily::Unary => Self::unary(),
            OperatorFamily::Equality | OperatorFamily::Relational => Self::predicate(),
            OperatorFamily::Arithmetic | OperatorFamily::Bitwise => Self::binary(),
        }
    }

    pub fn params(&self) -> &[ParamKind] {
        &self.params
    }

    pub fn returns(&self) -> ReturnKind {
        self.returns
    }

    pub fn has_rest(&self) -> bool {
        self.params.last() == Some(&ParamKind::Rest)
    }

    /// Parameters before the rest parameter.
    pub fn fixed_len(&self) -> usize {
        self.params.len() - usize::from(self.has_rest())
    }

    /// Whether `argc` operands fit this signature.
    pub fn accepts(&self, argc: usize) -> bool {
        if self.has_rest() {
            argc > self.fixed_len()
        } else {
            argc == self.fixed_len()
        }
    }

    /// Human-readable operand count, e.g. `2` or `more than 10`.
    pub fn expected_operands(&self) -> String {
        if self.has_rest() {
            format!("more than {}", self.fixed_len())
        } else {
            self.fixed_len().to_string()
        }
    }

    /// Check this signature against `operator`'s calling convention.
    pub fn validate_for(&self, operator: Operator) -> Result<(), LinkError> {
        let mismatch = |reason: String| LinkError::SignatureMismatch {
            operator: operator.name(),
            reason,
        };
        let fixed = self.fixed_len();

        if self.params[..fixed].contains(&ParamKind::Rest) {
            return Err(mismatch("rest parameter must be last".to_string()));
        }

        match operator.family() {
            OperatorFamily::Concat => {
                if fixed < 2 {
                    return Err(mismatch(format!(
                        "concat needs at least 2 operands, signature has {fixed}"
                    )));
                }
                if self.params[..fixed].iter().any(|p| *p != ParamKind::StringLike) {
                    return Err(mismatch("concat operands must be string-like".to_string()));
                }
                if self.has_rest() && fixed != CONCAT_MAX_ARITY {
                    return Err(mismatch(format!(
                        "a rest parameter follows exactly {CONCAT_MAX_ARITY} fixed operands"
                    )));
                }
                if fixed > CONCAT_MAX_ARITY {
                    return Err(mismatch(format!(
                        "operands beyond {CONCAT_MAX_ARITY} must be collected into a rest parameter"
                    )));
                }
                if self.returns == ReturnKind::Boolean {
                    return Err(mismatch("concat returns a string".to_string()));
                }
                Ok(())
            }
            family => {
                if self.has_rest() {
                    return Err(mismatch(format!("{family} operators take no rest parameter")));
                }
                let (min, exact) = match family {
                    OperatorFamily::Call | OperatorFamily::Super => (2, false),
                    OperatorFamily::Construct => (1, false),
                    OperatorFamily::Unary => (1, true),
                    _ => (2, true),
                };
                if (exact && fixed != min) || fixed < min {
                    let expected = if exact {
                        min.to_string()
                    } else {
                        format!("at least {min}")
                    };
                    return Err(mismatch(format!(
                        "expected {expected} parameters, signature has {fixed}"
                    )));
                }
                if operator.is_predicate() && self.returns == ReturnKind::String {
                    return Err(mismatch("comparisons return a boolean".to_string()));
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for CallSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(match param {
                ParamKind::Value => "value",
                ParamKind::StringLike => "string",
                ParamKind::Rest => "...string",
            })?;
        }
        let returns = match self.returns {
            ReturnKind::Value => "value",
            ReturnKind::Boolean => "boolean",
            ReturnKind::String => "string",
        };
        write!(f, ") -> {returns}")
    }
}
