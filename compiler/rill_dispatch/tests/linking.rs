//! End-to-end linking behavior through the public API.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use rill_dispatch::{
    CallSignature, LinkKind, LinkMode, Linker, LinkerBuilder, Operator, StatsSnapshot,
};
use rill_stack::StackBudget;
use rill_value::{ErrorCategory, EvalErrorKind, FunctionKind, MethodRef, Value};

fn site(linker: &Linker, op: Operator) -> rill_dispatch::CallSite {
    linker
        .link_operator(op, CallSignature::for_operator(op, 0))
        .unwrap()
}

#[test]
fn linkage_happens_once_per_site() {
    let linker = Linker::new();
    let add = site(&linker, Operator::Add);
    for _ in 0..10 {
        add.invoke(&[Value::number(1.0), Value::number(1.0)]).unwrap();
    }
    assert_eq!(add.stats().bootstraps, 1);

    // A second site for the same operator links independently.
    let other = site(&linker, Operator::Add);
    other.invoke(&[Value::string("a"), Value::string("b")]).unwrap();
    assert_eq!(other.stats().bootstraps, 1);
    assert_eq!(add.link_kind(), LinkKind::Specialized);
    assert_eq!(
        other.state().to_string(),
        "specialized [is string] add.string else add.generic"
    );
}

#[test]
fn first_guard_miss_collapses_for_good() {
    let eq = site(&Linker::new(), Operator::StrictEquals);
    assert_eq!(
        eq.invoke(&[Value::boolean(true), Value::boolean(true)]),
        Ok(Value::boolean(true))
    );
    assert_eq!(
        eq.invoke(&[Value::number(1.0), Value::string("1")]),
        Ok(Value::boolean(false))
    );
    assert_eq!(eq.link_kind(), LinkKind::Generic);
    let after_relink = eq.stats();
    for _ in 0..5 {
        eq.invoke(&[Value::boolean(true), Value::boolean(true)]).unwrap();
    }
    let stats = eq.stats();
    assert_eq!(stats.guard_checks, after_relink.guard_checks);
    assert_eq!(stats.relinks, 1);
    assert_eq!(eq.link_kind(), LinkKind::Generic);
}

#[test]
fn mixed_numeric_kinds_are_rejected() {
    let sub = site(&Linker::new(), Operator::Sub);
    let err = sub.invoke(&[Value::number(1.0), Value::bigint(2)]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::TypeError);
    assert!(matches!(err.kind, EvalErrorKind::MixedNumericKinds { .. }));
    assert_eq!(sub.link_kind(), LinkKind::Generic);
}

#[test]
fn loose_equality_across_kinds_still_works() {
    let eq = site(&Linker::new(), Operator::Eq);
    assert_eq!(
        eq.invoke(&[Value::bigint(1), Value::number(1.0)]),
        Ok(Value::boolean(true))
    );
    let lt = site(&Linker::new(), Operator::LessThan);
    assert_eq!(
        lt.invoke(&[Value::bigint(1), Value::number(1.5)]),
        Ok(Value::boolean(true))
    );
}

#[test]
fn exhaustion_is_isolated_to_its_site() {
    let starved = Linker::with_config(
        LinkerBuilder::new()
            .stack_budget(StackBudget::exhausted())
            .build(),
    );
    let add = site(&starved, Operator::Add);
    let err = add.invoke(&[Value::number(1.0), Value::number(2.0)]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::RangeError);
    assert_eq!(add.link_kind(), LinkKind::Terminal);

    let mul = site(&Linker::new(), Operator::Mul);
    assert_eq!(
        mul.invoke(&[Value::number(3.0), Value::number(4.0)]),
        Ok(Value::number(12.0))
    );
    assert_eq!(mul.link_kind(), LinkKind::Specialized);

    // The terminal site stays terminal.
    assert!(add.invoke(&[Value::number(1.0), Value::number(2.0)]).is_err());
    assert_eq!(add.link_kind(), LinkKind::Terminal);
}

#[test]
fn generic_only_mode_never_specializes() {
    let linker = Linker::with_config(LinkerBuilder::new().mode(LinkMode::GenericOnly).build());
    for op in [Operator::Add, Operator::LessThan, Operator::Neg, Operator::Concat] {
        let s = linker
            .link_operator(op, CallSignature::for_operator(op, 2))
            .unwrap();
        let args: Vec<Value> = s.signature().params().iter().map(|_| Value::number(2.0)).collect();
        s.invoke(&args).unwrap();
        s.invoke(&args).unwrap();
        assert_eq!(s.link_kind(), LinkKind::Generic, "{op}");
        assert_eq!(
            s.stats(),
            StatsSnapshot {
                invocations: 2,
                bootstraps: 1,
                guard_checks: 0,
                relinks: 0,
            }
        );
    }
}

#[test]
fn call_site_guards_on_method_identity() {
    let double = MethodRef::new("double", FunctionKind::Normal, 1, |inv| {
        Ok(Value::number(inv.arg(0).to_number()? * 2.0))
    });
    let negate = MethodRef::new("negate", FunctionKind::Normal, 1, |inv| {
        Ok(Value::number(-inv.arg(0).to_number()?))
    });
    let call = Linker::new().link("call", CallSignature::call(1)).unwrap();

    let d = Value::function(&double);
    assert_eq!(
        call.invoke(&[d.clone(), Value::Undefined, Value::number(4.0)]),
        Ok(Value::number(8.0))
    );
    // A different closure of the same method keeps the fast path.
    assert_eq!(
        call.invoke(&[Value::function(&double), Value::Undefined, Value::number(5.0)]),
        Ok(Value::number(10.0))
    );
    assert_eq!(call.link_kind(), LinkKind::Specialized);

    assert_eq!(
        call.invoke(&[Value::function(&negate), Value::Undefined, Value::number(5.0)]),
        Ok(Value::number(-5.0))
    );
    assert_eq!(call.link_kind(), LinkKind::Generic);
    assert_eq!(
        call.invoke(&[d, Value::Undefined, Value::number(1.0)]),
        Ok(Value::number(2.0))
    );
}

#[test]
fn construct_site_builds_instances() {
    let ctor = MethodRef::new("Box", FunctionKind::ClassConstructor, 1, |inv| {
        if let Value::Object(obj) = inv.this {
            obj.set_named("value", inv.arg(0))?;
        }
        Ok(Value::Undefined)
    });
    let construct = Linker::new()
        .link("construct", CallSignature::construct(1))
        .unwrap();
    let a = construct
        .invoke(&[Value::function(&ctor), Value::number(1.0)])
        .unwrap();
    let b = construct
        .invoke(&[Value::function(&ctor), Value::number(2.0)])
        .unwrap();
    let (a, b) = (a.as_object().unwrap(), b.as_object().unwrap());
    assert!(!a.ptr_eq(b));
    assert_eq!(a.get_named("value"), Some(Value::number(1.0)));
    assert_eq!(b.get_named("value"), Some(Value::number(2.0)));
    assert_eq!(construct.link_kind(), LinkKind::Specialized);

    let call = Linker::new().link("call", CallSignature::call(1)).unwrap();
    let err = call
        .invoke(&[Value::function(&ctor), Value::Undefined, Value::Null])
        .unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::ClassConstructorCall { .. }));
}

#[test]
fn wide_concat_uses_rest_signature() {
    let concat = Linker::new()
        .link("concat", CallSignature::concat(12))
        .unwrap();
    let parts: Vec<Value> = (0..12).map(|i| Value::string(i.to_string())).collect();
    assert_eq!(
        concat.invoke(&parts),
        Ok(Value::string("01234567891011"))
    );
    assert_eq!(concat.link_kind(), LinkKind::Generic);
    let fewer: Vec<Value> = (0..10).map(|_| Value::string("x")).collect();
    assert!(concat.invoke(&fewer).is_err());
}
