//! String concatenation sites.
//!
//! `concat` specializes on arity instead of operand type. Arities 2 through
//! 10 get a fixed-arity target behind a length guard: every operand is a
//! string and the total length is at most 5 characters per operand. Wider
//! sites, and sites whose first operands miss the guard, link straight to
//! the variable-arity generic builder.

use rill_value::{EvalResult, Value};

use crate::chain::{DispatchState, Guard, StaticTarget, Target};
use crate::signature::CONCAT_MAX_ARITY;

/// Default per-operand length budget of the specialized path.
pub const DEFAULT_CHARS_PER_ARG: usize = 5;

pub static GENERIC: StaticTarget = StaticTarget::new("concat.generic", generic);

static FIXED: [StaticTarget; CONCAT_MAX_ARITY - 1] = [
    StaticTarget::new("concat.2", fixed::<2>),
    StaticTarget::new("concat.3", fixed::<3>),
    StaticTarget::new("concat.4", fixed::<4>),
    StaticTarget::new("concat.5", fixed::<5>),
    StaticTarget::new("concat.6", fixed::<6>),
    StaticTarget::new("concat.7", fixed::<7>),
    StaticTarget::new("concat.8", fixed::<8>),
    StaticTarget::new("concat.9", fixed::<9>),
    StaticTarget::new("concat.10", fixed::<10>),
];

/// Length budget of the concat guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConcatBudget {
    arity: usize,
    chars_per_arg: usize,
}

impl ConcatBudget {
    pub fn new(arity: usize, chars_per_arg: usize) -> Self {
        ConcatBudget {
            arity,
            chars_per_arg,
        }
    }

    /// Maximum total length, in UTF-16 code units.
    pub fn total(&self) -> usize {
        self.arity.saturating_mul(self.chars_per_arg)
    }

    /// The guard: `arity` string operands whose summed length stays within
    /// the budget.
    ///
    /// Work per operand is bounded by the budget, not the operand length.
    pub fn admits(&self, args: &[Value]) -> bool {
        if args.len() != self.arity {
            return false;
        }
        let limit = self.total();
        let mut total: usize = 0;
        for arg in args {
            let Value::Str(s) = arg else {
                return false;
            };
            let remaining = limit - total;
            // A code unit covers at most three bytes.
            if s.len() / 3 > remaining {
                return false;
            }
            let len = if s.is_ascii() {
                s.len()
            } else {
                s.encode_utf16().take(remaining.saturating_add(1)).count()
            };
            if len > remaining {
                return false;
            }
            total += len;
        }
        true
    }
}

/// Variable-arity builder: every operand converted to a string.
pub fn generic(args: &[Value]) -> EvalResult {
    let mut out = String::new();
    for arg in args {
        match arg {
            Value::Str(s) => out.push_str(s),
            other => out.push_str(&other.to_display_string()),
        }
    }
    Ok(Value::string(out))
}

/// Fixed-arity target; the operand loop unrolls per `N`.
fn fixed<const N: usize>(args: &[Value]) -> EvalResult {
    let Ok(operands) = <&[Value; N]>::try_from(args) else {
        return generic(args);
    };
    let mut out = String::with_capacity(N * DEFAULT_CHARS_PER_ARG);
    for operand in operands {
        let Value::Str(s) = operand else {
            return generic(args);
        };
        out.push_str(s);
    }
    Ok(Value::string(out))
}

/// Fixed-arity target for `arity`, if it has one.
pub fn fixed_target(arity: usize) -> Option<&'static StaticTarget> {
    arity.checked_sub(2).and_then(|i| FIXED.get(i))
}

/// Link a concat site from its first operands.
pub(crate) fn link(args: &[Value], max_arity: usize, chars_per_arg: usize) -> DispatchState {
    let arity = args.len();
    let budget = ConcatBudget::new(arity, chars_per_arg);
    let fixed = fixed_target(arity).filter(|_| arity <= max_arity);
    match fixed {
        Some(target) if budget.admits(args) => DispatchState::Specialized {
            guard: Guard::ConcatWithin(budget),
            target: Target::Static(target),
            fallback: Target::Static(&GENERIC),
        },
        _ => DispatchState::Generic(Target::Static(&GENERIC)),
    }
}
