use pretty_assertions::assert_eq;
use rill_value::{FunctionKind, MethodRef};

use super::*;
use crate::generic::arithmetic;
use crate::specialized;

fn method(name: &str) -> MethodRef {
    MethodRef::new(name, FunctionKind::Normal, 0, |inv| Ok(inv.arg(0)))
}

mod guards {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn binary_guard_requires_both_operands() {
        let guard = Guard::Binary(Classification::Number);
        assert!(guard.test(&[Value::number(1.0), Value::number(2.0)]));
        assert!(!guard.test(&[Value::number(1.0), Value::bigint(2)]));
        assert!(!guard.test(&[Value::number(1.0)]));
    }

    #[test]
    fn unary_guard_checks_one_operand() {
        let guard = Guard::Unary(Classification::BigInt);
        assert!(guard.test(&[Value::bigint(3)]));
        assert!(!guard.test(&[Value::number(3.0)]));
        assert!(!guard.test(&[Value::bigint(3), Value::bigint(3)]));
    }

    #[test]
    fn method_guard_compares_identity() {
        let seen = method("f");
        let twin = method("f");
        let guard = Guard::MethodIs(seen.clone());
        assert!(guard.test(&[Value::function(&seen), Value::Undefined]));
        // A second closure over the same method still matches.
        assert!(guard.test(&[Value::function(&seen)]));
        assert!(!guard.test(&[Value::function(&twin), Value::Undefined]));
        assert!(!guard.test(&[Value::Null, Value::Undefined]));
        assert!(!guard.test(&[]));
    }

    #[test]
    fn concat_guard_delegates_to_budget() {
        let guard = Guard::ConcatWithin(ConcatBudget::new(2, 5));
        assert!(guard.test(&[Value::string("ab"), Value::string("cd")]));
        assert!(!guard.test(&[Value::string("abcdef"), Value::string("ghijk")]));
    }

    #[test]
    fn descriptions() {
        assert_eq!(Guard::Binary(Classification::String).describe(), "is string");
        assert_eq!(
            Guard::ConcatWithin(ConcatBudget::new(3, 5)).describe(),
            "strings within 15 chars"
        );
    }
}

mod targets {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn static_target_runs_its_function() {
        let target = Target::Static(&arithmetic::ADD);
        let result = target.invoke(&[Value::number(1.0), Value::number(2.0)]);
        assert_eq!(result, Ok(Value::number(3.0)));
        assert_eq!(target.describe(), "add.generic");
    }

    #[test]
    fn direct_target_enters_the_method() {
        let m = method("identity");
        let target = Target::Direct {
            method: m.clone(),
            kind: InvokeKind::Call,
        };
        let args = [Value::function(&m), Value::Undefined, Value::number(9.0)];
        assert_eq!(target.invoke(&args), Ok(Value::number(9.0)));
        assert!(target.describe().starts_with("call identity#"));
    }
}

mod states {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn kinds() {
        assert_eq!(DispatchState::Unlinked.kind(), LinkKind::Unlinked);
        assert_eq!(
            DispatchState::Generic(Target::Static(&arithmetic::SUB)).kind(),
            LinkKind::Generic
        );
        let terminal = TerminalTarget::for_family(crate::operator::OperatorFamily::Unary);
        assert_eq!(DispatchState::Terminal(terminal).kind(), LinkKind::Terminal);
    }

    #[test]
    fn display() {
        let state = DispatchState::Specialized {
            guard: Guard::Binary(Classification::Number),
            target: Target::Static(&specialized::SUB_NUMBER),
            fallback: Target::Static(&arithmetic::SUB),
        };
        assert_eq!(state.kind(), LinkKind::Specialized);
        assert_eq!(
            state.to_string(),
            "specialized [is number] sub.number else sub.generic"
        );
        assert_eq!(DispatchState::Unlinked.to_string(), "unlinked");
        let terminal = TerminalTarget::for_family(crate::operator::OperatorFamily::Concat);
        assert_eq!(DispatchState::Terminal(terminal).to_string(), "terminal concat");
    }
}
