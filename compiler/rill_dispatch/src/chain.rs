//! Dispatch chains: what a call site runs.
//!
//! A linked site holds one `DispatchState`. The specialized form is the
//! guard/target/fallback triple: `guard(args) ? target(args) : fallback(args)`,
//! where taking the fallback also relinks the site (see `site`).

use std::fmt;

use rill_value::{EvalResult, MethodRef, Value};

use crate::concat::ConcatBudget;
use crate::exhaustion::TerminalTarget;
use crate::invoke::{self, InvokeKind};
use crate::lattice::{classify, classify_pair, Classification};

/// Plain function implementing one operator over a flat operand slice.
pub type OpFn = fn(&[Value]) -> EvalResult;

/// A named, statically allocated target.
pub struct StaticTarget {
    pub name: &'static str,
    pub run: OpFn,
}

impl StaticTarget {
    pub const fn new(name: &'static str, run: OpFn) -> Self {
        StaticTarget { name, run }
    }
}

impl fmt::Debug for StaticTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Something a site can run.
#[derive(Clone, Debug)]
pub enum Target {
    /// A specialized or generic operator implementation.
    Static(&'static StaticTarget),
    /// A known compiled method's own entry point.
    Direct { method: MethodRef, kind: InvokeKind },
}

impl Target {
    #[inline]
    pub fn invoke(&self, args: &[Value]) -> EvalResult {
        match self {
            Target::Static(target) => (target.run)(args),
            Target::Direct { method, kind } => invoke::direct(method, *kind, args),
        }
    }

    /// Short label for logs and the CLI.
    pub fn describe(&self) -> String {
        match self {
            Target::Static(target) => target.name.to_string(),
            Target::Direct { method, kind } => format!("{kind} {method:?}"),
        }
    }
}

/// The cheap runtime test in front of a specialized target.
#[derive(Clone, Debug)]
pub enum Guard {
    /// The single operand classifies as the given leaf.
    Unary(Classification),
    /// Both operands classify as the given leaf.
    Binary(Classification),
    /// The callee runs exactly this compiled method.
    MethodIs(MethodRef),
    /// Every operand is a string and the total length fits the budget.
    ConcatWithin(ConcatBudget),
}

impl Guard {
    #[inline]
    pub fn test(&self, args: &[Value]) -> bool {
        match self {
            Guard::Unary(expected) => {
                matches!(args, [operand] if classify(operand) == *expected)
            }
            Guard::Binary(expected) => {
                matches!(args, [left, right] if classify_pair(left, right) == *expected)
            }
            Guard::MethodIs(method) => matches!(
                args.first(),
                Some(Value::Function(callee)) if callee.method().ptr_eq(method)
            ),
            Guard::ConcatWithin(budget) => budget.admits(args),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Guard::Unary(c) | Guard::Binary(c) => format!("is {c}"),
            Guard::MethodIs(method) => format!("callee is {method:?}"),
            Guard::ConcatWithin(budget) => {
                format!("strings within {} chars", budget.total())
            }
        }
    }
}

/// Current behavior of a call site.
#[derive(Clone, Debug)]
pub enum DispatchState {
    /// Not yet reached; the next invocation bootstraps.
    Unlinked,
    /// Guarded fast path with a one-shot fallback.
    Specialized {
        guard: Guard,
        target: Target,
        fallback: Target,
    },
    /// Permanently generic.
    Generic(Target),
    /// Linking ran out of stack; every invocation fails.
    Terminal(&'static TerminalTarget),
}

/// Coarse view of a `DispatchState`, for assertions and reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Unlinked,
    Specialized,
    Generic,
    Terminal,
}

impl DispatchState {
    pub fn kind(&self) -> LinkKind {
        match self {
            DispatchState::Unlinked => LinkKind::Unlinked,
            DispatchState::Specialized { .. } => LinkKind::Specialized,
            DispatchState::Generic(_) => LinkKind::Generic,
            DispatchState::Terminal(_) => LinkKind::Terminal,
        }
    }
}

impl fmt::Display for DispatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchState::Unlinked => f.write_str("unlinked"),
            DispatchState::Specialized {
                guard,
                target,
                fallback,
            } => write!(
                f,
                "specialized [{}] {} else {}",
                guard.describe(),
                target.describe(),
                fallback.describe()
            ),
            DispatchState::Generic(target) => write!(f, "generic {}", target.describe()),
            DispatchState::Terminal(terminal) => write!(f, "terminal {}", terminal.family()),
        }
    }
}

#[cfg(test)]
mod tests;
