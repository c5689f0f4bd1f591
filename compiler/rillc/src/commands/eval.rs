//! `rill eval`: link one call site and drive it.

use std::fmt;

use rill_dispatch::{
    CallSignature, DispatchState, LinkError, Linker, Operator, OperatorFamily, StatsSnapshot,
};
use rill_value::{EvalResult, Value};

/// What a driven site answered and how it ended up linked.
#[derive(Debug)]
pub struct EvalOutcome {
    pub operator: Operator,
    pub results: Vec<EvalResult>,
    pub state: DispatchState,
    pub stats: StatsSnapshot,
}

/// Link a site for the operator called `name` and invoke it `times` times
/// with the same operands.
pub fn eval_operator(
    linker: &Linker,
    name: &str,
    operands: &[Value],
    times: usize,
) -> Result<EvalOutcome, LinkError> {
    let operator = Operator::from_name(name)?;
    let signature = CallSignature::for_operator(operator, call_argc(operator, operands.len()));
    let site = linker.link_operator(operator, signature)?;

    let results = (0..times).map(|_| site.invoke(operands)).collect();
    Ok(EvalOutcome {
        operator,
        results,
        state: site.state(),
        stats: site.stats(),
    })
}

/// Argument count excluding the callee and receiver slots.
fn call_argc(operator: Operator, operands: usize) -> usize {
    match operator.family() {
        OperatorFamily::Call | OperatorFamily::Super => operands.saturating_sub(2),
        OperatorFamily::Construct => operands.saturating_sub(1),
        _ => operands,
    }
}

/// Render a value for the terminal, expanding objects one level.
pub fn render_value(value: &Value) -> String {
    let Value::Object(obj) = value else {
        return value.to_string();
    };
    let fields: Vec<String> = obj
        .own_keys()
        .into_iter()
        .map(|key| {
            let field = obj
                .get(&rill_value::PropertyKey::from_name(&key))
                .unwrap_or(Value::Undefined);
            format!("{key}: {field}")
        })
        .collect();
    if fields.is_empty() {
        format!("{} {{}}", obj.class_name())
    } else {
        format!("{} {{ {} }}", obj.class_name(), fields.join(", "))
    }
}

impl fmt::Display for EvalOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, result) in self.results.iter().enumerate() {
            match result {
                Ok(value) => writeln!(f, "#{} => {}", i + 1, render_value(value))?,
                Err(err) => writeln!(f, "#{} !! {err}", i + 1)?,
            }
        }
        writeln!(f, "state: {}", self.state)?;
        write!(
            f,
            "stats: invocations={} bootstraps={} guard_checks={} relinks={}",
            self.stats.invocations, self.stats.bootstraps, self.stats.guard_checks, self.stats.relinks
        )
    }
}
