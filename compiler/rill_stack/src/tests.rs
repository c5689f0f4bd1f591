use super::*;

#[test]
fn test_shallow_recursion() {
    fn factorial(n: u64) -> u64 {
        ensure_sufficient_stack(|| if n <= 1 { 1 } else { n * factorial(n - 1) })
    }

    assert_eq!(factorial(10), 3_628_800);
}

#[test]
fn test_deep_recursion() {
    // This would overflow without stack growth
    fn deep_recurse(n: u64) -> u64 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { deep_recurse(n - 1) + 1 })
    }

    assert_eq!(deep_recurse(100_000), 100_000);
}

#[test]
fn test_scope_tracks_depth() {
    let budget = StackBudget::default();
    let before = current_depth();
    {
        let _outer = budget.enter();
        assert_eq!(current_depth(), before + 1);
        {
            let _inner = budget.enter();
            assert_eq!(current_depth(), before + 2);
        }
        assert_eq!(current_depth(), before + 1);
    }
    assert_eq!(current_depth(), before);
}

#[test]
fn test_depth_limit_reports_exhaustion() {
    let budget = StackBudget::default().with_max_depth(2);
    let first = budget.enter();
    assert!(first.is_ok());
    let second = budget.enter();
    assert!(second.is_ok());
    let third = budget.enter();
    let Err(err) = third else {
        panic!("third scope should exceed a depth limit of 2");
    };
    assert_eq!(err.depth, 2);
}

#[test]
fn test_failed_enter_does_not_leak_depth() {
    let before = current_depth();
    assert!(StackBudget::exhausted().enter().is_err());
    assert_eq!(current_depth(), before);
}

#[test]
fn test_exhausted_budget_always_fails() {
    let result = StackBudget::exhausted().run(|| 1);
    assert!(result.is_err());
}

#[test]
fn test_red_zone_larger_than_stack_fails() {
    // No thread has usize::MAX bytes left.
    let budget = StackBudget::default().with_red_zone(usize::MAX);
    if remaining_stack().is_some() {
        assert!(budget.run(|| ()).is_err());
    }
}

#[test]
fn test_run_returns_closure_result() {
    let result = StackBudget::default().run(|| 42);
    assert_eq!(result, Ok(42));
}

#[test]
fn test_display_mentions_depth() {
    let err = StackExhausted {
        depth: 7,
        remaining: None,
    };
    assert_eq!(err.to_string(), "control stack exhausted at depth 7");
}

#[test]
fn test_budget_opens_after_stack_growth() {
    // Deep recursion through growth points must never trip a budget scope.
    fn descend(budget: &StackBudget, n: u64) -> Result<u64, StackExhausted> {
        ensure_sufficient_stack(|| {
            budget.run(|| ())?;
            if n == 0 {
                Ok(0)
            } else {
                descend(budget, n - 1).map(|d| d + 1)
            }
        })
    }

    assert_eq!(descend(&StackBudget::default(), 10_000), Ok(10_000));
}
