//! Property tests: a linked site answers exactly what the generic target
//! answers, whatever it was linked with and however it relinks.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use proptest::prelude::*;
use rill_dispatch::{
    concat_fixed_target, descriptor, generic_target, CallSignature, LinkKind, LinkMode, Linker,
    LinkerBuilder, OperandShape, Operator, CONCAT_MAX_ARITY, DEFAULT_CHARS_PER_ARG,
};
use rill_value::Value;

fn short_string() -> impl Strategy<Value = String> {
    "[a-z0-9]{0,5}"
}

fn any_string() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => short_string(),
        1 => "[a-zé€]{0,12}",
    ]
}

fn operand() -> impl Strategy<Value = Value> {
    prop_oneof![
        3 => (-1.0e6f64..1.0e6).prop_map(Value::number),
        1 => Just(Value::number(f64::NAN)),
        1 => Just(Value::number(-0.0)),
        3 => (-2_000i64..2_000).prop_map(Value::bigint),
        2 => short_string().prop_map(Value::string),
        1 => any::<bool>().prop_map(Value::boolean),
        1 => Just(Value::Undefined),
        1 => Just(Value::Null),
    ]
}

fn binary_operator() -> impl Strategy<Value = Operator> {
    prop::sample::select(
        Operator::ALL
            .into_iter()
            .filter(|op| descriptor(*op).is_some_and(|d| d.shape == OperandShape::Binary))
            .collect::<Vec<_>>(),
    )
}

fn generic(op: Operator, args: &[Value]) -> rill_value::EvalResult {
    (generic_target(op).run)(args)
}

proptest! {
    #[test]
    fn binary_site_matches_generic(
        op in binary_operator(),
        calls in prop::collection::vec((operand(), operand()), 1..12),
    ) {
        let site = Linker::new()
            .link_operator(op, CallSignature::for_operator(op, 0))
            .unwrap();
        for (a, b) in &calls {
            let args = [a.clone(), b.clone()];
            prop_assert_eq!(site.invoke(&args), generic(op, &args));
        }
        let stats = site.stats();
        prop_assert_eq!(stats.bootstraps, 1);
        prop_assert!(stats.relinks <= 1);
    }

    #[test]
    fn unary_site_matches_generic(
        op in prop::sample::select(vec![Operator::Neg, Operator::BitNot, Operator::Inc, Operator::Dec]),
        calls in prop::collection::vec(operand(), 1..12),
    ) {
        let site = Linker::new().link_operator(op, CallSignature::unary()).unwrap();
        for v in &calls {
            let args = [v.clone()];
            prop_assert_eq!(site.invoke(&args), generic(op, &args));
        }
    }

    #[test]
    fn concat_fixed_targets_match_generic(
        parts in prop::collection::vec(short_string(), 2..=CONCAT_MAX_ARITY),
    ) {
        let args: Vec<Value> = parts.iter().map(|p| Value::string(p.as_str())).collect();
        let fixed = concat_fixed_target(args.len()).unwrap();
        prop_assert_eq!((fixed.run)(&args), generic(Operator::Concat, &args));
        prop_assert_eq!((fixed.run)(&args), Ok(Value::string(parts.concat())));
    }

    #[test]
    fn concat_site_matches_generic(
        first in prop::collection::vec(any_string(), 2..=CONCAT_MAX_ARITY),
        later in prop::collection::vec(any_string(), 0..6),
    ) {
        let arity = first.len();
        let site = Linker::new().link("concat", CallSignature::concat(arity)).unwrap();
        let args: Vec<Value> = first.iter().map(|p| Value::string(p.as_str())).collect();
        prop_assert_eq!(site.invoke(&args), generic(Operator::Concat, &args));

        let within = first
            .iter()
            .map(|p| p.encode_utf16().count())
            .sum::<usize>()
            <= arity * DEFAULT_CHARS_PER_ARG;
        let expected = if within { LinkKind::Specialized } else { LinkKind::Generic };
        prop_assert_eq!(site.link_kind(), expected);

        // Reuse the site with other strings of the same arity.
        let mut rotated = first.clone();
        for extra in later {
            rotated.rotate_left(1);
            rotated[0] = extra;
            let args: Vec<Value> = rotated.iter().map(|p| Value::string(p.as_str())).collect();
            prop_assert_eq!(site.invoke(&args), generic(Operator::Concat, &args));
        }
    }

    #[test]
    fn wide_concat_links_generic(parts in prop::collection::vec(short_string(), 11..16)) {
        let site = Linker::new().link("concat", CallSignature::concat(parts.len())).unwrap();
        let args: Vec<Value> = parts.iter().map(|p| Value::string(p.as_str())).collect();
        prop_assert_eq!(site.invoke(&args), Ok(Value::string(parts.concat())));
        prop_assert_eq!(site.link_kind(), LinkKind::Generic);
    }

    #[test]
    fn generic_only_matches_adaptive(
        op in binary_operator(),
        a in operand(),
        b in operand(),
    ) {
        let generic_only =
            Linker::with_config(LinkerBuilder::new().mode(LinkMode::GenericOnly).build());
        let sig = CallSignature::for_operator(op, 0);
        let adaptive = Linker::new().link_operator(op, sig.clone()).unwrap();
        let plain = generic_only.link_operator(op, sig).unwrap();
        let args = [a, b];
        prop_assert_eq!(adaptive.invoke(&args), plain.invoke(&args));
    }
}
