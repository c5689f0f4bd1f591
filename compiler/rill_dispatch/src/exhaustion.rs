//! Recovery from control-stack exhaustion during linking.
//!
//! Chain construction runs inside a [`StackBudget`] scope. If the scope cannot be
//! opened, nothing is built or installed; the site gets its family's
//! terminal target instead. Terminal targets are statics, so installing
//! one allocates nothing and cannot itself exhaust anything.

use rill_stack::{StackBudget, StackExhausted};
use rill_value::{stack_exhausted, EvalResult};

use crate::operator::OperatorFamily;

/// A target that always raises a stack-exhaustion error.
#[derive(Debug)]
pub struct TerminalTarget {
    family: OperatorFamily,
}

static TERMINALS: [TerminalTarget; 9] = [
    TerminalTarget::new(OperatorFamily::Call),
    TerminalTarget::new(OperatorFamily::Construct),
    TerminalTarget::new(OperatorFamily::Super),
    TerminalTarget::new(OperatorFamily::Concat),
    TerminalTarget::new(OperatorFamily::Arithmetic),
    TerminalTarget::new(OperatorFamily::Bitwise),
    TerminalTarget::new(OperatorFamily::Equality),
    TerminalTarget::new(OperatorFamily::Relational),
    TerminalTarget::new(OperatorFamily::Unary),
];

impl TerminalTarget {
    const fn new(family: OperatorFamily) -> Self {
        TerminalTarget { family }
    }

    /// The shared terminal target of `family`.
    pub fn for_family(family: OperatorFamily) -> &'static TerminalTarget {
        &TERMINALS[family.ordinal()]
    }

    pub fn family(&self) -> OperatorFamily {
        self.family
    }

    #[cold]
    pub fn invoke(&self) -> EvalResult {
        Err(stack_exhausted(self.family.name()))
    }
}

/// Run `link` inside a budget scope, or report which terminal to install.
pub(crate) fn within_budget<R>(
    budget: &StackBudget,
    family: OperatorFamily,
    link: impl FnOnce() -> R,
) -> Result<R, &'static TerminalTarget> {
    budget.run(link).map_err(|exhausted: StackExhausted| {
        tracing::debug!(
            family = family.name(),
            depth = exhausted.depth,
            remaining = ?exhausted.remaining,
            "link: stack exhausted, installing terminal target"
        );
        TerminalTarget::for_family(family)
    })
}

#[cfg(test)]
mod tests;
