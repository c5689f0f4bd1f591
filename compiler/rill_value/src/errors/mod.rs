//! Language-level evaluation errors.
//!
//! # Structured Error Categories
//!
//! `EvalErrorKind` carries typed data for each failure so callers can
//! match on the condition instead of parsing messages. Factory functions
//! (e.g. `mixed_numeric_kinds()`) are the public API; they fill in both
//! `kind` and `message`. `EvalErrorKind::category` names the error the
//! running program observes (`TypeError`, `RangeError`, ...).

use std::fmt;

use crate::value::Value;

/// Result of evaluating an operation.
pub type EvalResult = Result<Value, EvalError>;

/// Error class visible to the running program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    TypeError,
    RangeError,
    InternalError,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::TypeError => "TypeError",
            ErrorCategory::RangeError => "RangeError",
            ErrorCategory::InternalError => "InternalError",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed error category for structured matching.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Numeric kinds
    MixedNumericKinds {
        operation: String,
    },
    BigIntToNumber,
    InvalidOperand {
        operation: String,
        type_name: String,
    },

    // BigInt ranges
    DivisionByZero,
    NegativeExponent,
    BigIntTooLarge {
        operation: String,
    },

    // Invocation
    NotCallable {
        type_name: String,
    },
    NotConstructor {
        type_name: String,
    },
    ClassConstructorCall {
        name: String,
    },
    ArityMismatch {
        operation: String,
        expected: String,
        got: usize,
    },

    // Resources
    StackExhausted {
        family: String,
    },

    // Element storage
    InvalidElementAccess {
        message: String,
    },

    /// Catch-all for errors not covered by a structured kind.
    Custom {
        message: String,
    },
}

impl EvalErrorKind {
    /// The language-level error class for this kind.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MixedNumericKinds { .. }
            | Self::BigIntToNumber
            | Self::InvalidOperand { .. }
            | Self::NotCallable { .. }
            | Self::NotConstructor { .. }
            | Self::ClassConstructorCall { .. }
            | Self::ArityMismatch { .. }
            | Self::Custom { .. } => ErrorCategory::TypeError,
            Self::DivisionByZero
            | Self::NegativeExponent
            | Self::BigIntTooLarge { .. }
            | Self::StackExhausted { .. }
            | Self::InvalidElementAccess { .. } => ErrorCategory::RangeError,
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MixedNumericKinds { operation } => {
                write!(f, "cannot mix BigInt and other types in {operation}, use explicit conversions")
            }
            Self::BigIntToNumber => write!(f, "cannot convert a BigInt value to a number"),
            Self::InvalidOperand {
                operation,
                type_name,
            } => write!(f, "operator {operation} cannot be applied to {type_name}"),

            Self::DivisionByZero => write!(f, "BigInt division by zero"),
            Self::NegativeExponent => write!(f, "BigInt exponent must be non-negative"),
            Self::BigIntTooLarge { operation } => {
                write!(f, "maximum BigInt size exceeded in {operation}")
            }

            Self::NotCallable { type_name } => write!(f, "{type_name} is not a function"),
            Self::NotConstructor { type_name } => write!(f, "{type_name} is not a constructor"),
            Self::ClassConstructorCall { name } => {
                write!(f, "class constructor {name} cannot be invoked without 'new'")
            }
            Self::ArityMismatch {
                operation,
                expected,
                got,
            } => write!(f, "{operation} expects {expected} operands, got {got}"),

            Self::StackExhausted { family } => {
                write!(f, "maximum call stack size exceeded while linking {family}")
            }

            Self::InvalidElementAccess { message } | Self::Custom { message } => {
                write!(f, "{message}")
            }
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for
    /// factory-created errors.
    pub message: String,
}

impl EvalError {
    /// Create an error with just a message (`Custom` kind).
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        EvalError {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
        }
    }

    /// Create an error from a structured kind.
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError { kind, message }
    }

    #[inline]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category(), self.message)
    }
}

impl std::error::Error for EvalError {}

impl From<rill_elements::ElementsError> for EvalError {
    fn from(err: rill_elements::ElementsError) -> Self {
        EvalError::from_kind(EvalErrorKind::InvalidElementAccess {
            message: err.to_string(),
        })
    }
}

// Factory functions

/// Number and BigInt operands met in an operation requiring one kind.
#[cold]
pub fn mixed_numeric_kinds(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MixedNumericKinds {
        operation: operation.to_string(),
    })
}

/// A BigInt reached a conversion that only produces numbers.
#[cold]
pub fn bigint_to_number() -> EvalError {
    EvalError::from_kind(EvalErrorKind::BigIntToNumber)
}

/// An operator that has no meaning for this operand type.
#[cold]
pub fn invalid_operand(operation: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidOperand {
        operation: operation.to_string(),
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn negative_exponent() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NegativeExponent)
}

#[cold]
pub fn bigint_too_large(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BigIntTooLarge {
        operation: operation.to_string(),
    })
}

#[cold]
pub fn not_callable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn not_constructor(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotConstructor {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn class_constructor_call(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ClassConstructorCall {
        name: name.to_string(),
    })
}

/// Operand count does not fit the call signature.
#[cold]
pub fn arity_mismatch(operation: &str, expected: impl fmt::Display, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        operation: operation.to_string(),
        expected: expected.to_string(),
        got,
    })
}

/// The control stack ran out while linking a call site of `family`.
#[cold]
pub fn stack_exhausted(family: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackExhausted {
        family: family.to_string(),
    })
}
