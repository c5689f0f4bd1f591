#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use rill_value::{ErrorCategory, EvalErrorKind};

use super::*;

#[test]
fn one_terminal_per_family() {
    for family in OperatorFamily::ALL {
        let terminal = TerminalTarget::for_family(family);
        assert_eq!(terminal.family(), family);
        assert!(std::ptr::eq(terminal, TerminalTarget::for_family(family)));
    }
}

#[test]
fn terminal_always_raises() {
    let terminal = TerminalTarget::for_family(OperatorFamily::Arithmetic);
    for _ in 0..3 {
        let err = terminal.invoke().unwrap_err();
        assert_eq!(
            err.kind,
            EvalErrorKind::StackExhausted {
                family: "arithmetic".to_string()
            }
        );
        assert_eq!(err.category(), ErrorCategory::RangeError);
    }
}

#[test]
fn spent_budget_reports_terminal_without_running() {
    let mut ran = false;
    let outcome = within_budget(&StackBudget::exhausted(), OperatorFamily::Concat, || {
        ran = true;
    });
    assert!(!ran);
    let terminal = outcome.err().map(TerminalTarget::family);
    assert_eq!(terminal, Some(OperatorFamily::Concat));
}

#[test]
fn healthy_budget_runs_link() {
    let outcome = within_budget(&StackBudget::default(), OperatorFamily::Call, || 7);
    assert_eq!(outcome.ok(), Some(7));
}
