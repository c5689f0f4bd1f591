//! The dispatch-site bootstrapper.
//!
//! [`Linker::link`] validates a linkage request and returns an unlinked
//! [`CallSite`]. The first invocation of that site lands in [`bootstrap`],
//! which:
//!
//! 1. classifies the operands (or inspects the callee, or counts concat
//!    operands);
//! 2. looks up a specialized target;
//! 3. installs `guard ? specialized : relink-to-generic`, or the bare
//!    generic target when nothing applies;
//! 4. runs the first invocation through what it installed.
//!
//! Steps 1-4 run inside the configured stack budget. When the budget is
//! exhausted nothing is built, and the site is parked on its family's
//! terminal target for good.

use rill_value::{EvalResult, Value};

use crate::chain::{DispatchState, Guard, Target};
use crate::config::{LinkerBuilder, LinkerConfig};
use crate::descriptor::{descriptor, generic_target, OperandShape};
use crate::exhaustion::within_budget;
use crate::invoke::{self, InvokeKind};
use crate::lattice::{classify, classify_pair};
use crate::operator::{Operator, OperatorFamily};
use crate::signature::CallSignature;
use crate::site::CallSite;
use crate::concat;

/// Rejected linkage requests.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    /// The operator name is not served here (e.g. `notEquals`).
    #[error("unsupported operator `{name}`")]
    Unsupported { name: String },
    /// The signature does not fit the operator's calling convention.
    #[error("signature does not fit `{operator}`: {reason}")]
    SignatureMismatch {
        operator: &'static str,
        reason: String,
    },
}

/// Creates call sites that share one configuration.
#[derive(Clone, Debug, Default)]
pub struct Linker {
    config: LinkerConfig,
}

impl Linker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LinkerConfig) -> Self {
        Linker { config }
    }

    /// A linker configured from `RILL_LINK_*` environment variables.
    pub fn from_env() -> Self {
        Self::with_config(LinkerConfig::from_env())
    }

    pub fn builder() -> LinkerBuilder {
        LinkerBuilder::new()
    }

    pub fn config(&self) -> &LinkerConfig {
        &self.config
    }

    /// Create an unlinked site for the operator called `name`.
    pub fn link(&self, name: &str, signature: CallSignature) -> Result<CallSite, LinkError> {
        self.link_operator(Operator::from_name(name)?, signature)
    }

    pub fn link_operator(
        &self,
        operator: Operator,
        signature: CallSignature,
    ) -> Result<CallSite, LinkError> {
        signature.validate_for(operator)?;
        Ok(CallSite::new(operator, signature, self.config))
    }
}

/// Link `site` from its first operands and run the first invocation.
///
/// Only chain construction runs inside the stack budget. The first
/// invocation runs after the scope closes.
#[tracing::instrument(level = "trace", skip_all, fields(operator = %site.operator()))]
pub(crate) fn bootstrap(site: &CallSite, args: &[Value]) -> EvalResult {
    site.record_bootstrap();
    let operator = site.operator();
    let config = site.config();

    let state = within_budget(&config.stack, operator.family(), || {
        build(operator, config, args)
    })
    .unwrap_or_else(DispatchState::Terminal);

    match site.install(state) {
        Ok(installed) => {
            tracing::debug!(%operator, state = %installed, "link: installed");
            first_invocation(operator, &installed, args)
        }
        Err(current) => {
            tracing::trace!(%operator, state = %current, "link: site already linked");
            site.run(&current, args)
        }
    }
}

/// Decide the state for a site whose first operands are `args`.
fn build(operator: Operator, config: &LinkerConfig, args: &[Value]) -> DispatchState {
    if !config.mode.specializes() {
        return DispatchState::Generic(Target::Static(generic_target(operator)));
    }
    match operator.family() {
        OperatorFamily::Call => invoke::link(InvokeKind::Call, args),
        OperatorFamily::Construct => invoke::link(InvokeKind::Construct, args),
        OperatorFamily::Super => invoke::link(InvokeKind::Super, args),
        OperatorFamily::Concat => {
            concat::link(args, config.concat_max_arity, config.concat_chars_per_arg)
        }
        _ => build_value_typed(operator, args),
    }
}

fn build_value_typed(operator: Operator, args: &[Value]) -> DispatchState {
    let Some(table) = descriptor(operator) else {
        return DispatchState::Generic(Target::Static(generic_target(operator)));
    };
    let generic = Target::Static(table.generic);
    let (classification, guard) = match (table.shape, args) {
        (OperandShape::Unary, [operand]) => {
            let c = classify(operand);
            (c, Guard::Unary(c))
        }
        (OperandShape::Binary, [left, right]) => {
            let c = classify_pair(left, right);
            (c, Guard::Binary(c))
        }
        _ => return DispatchState::Generic(generic),
    };
    match table.lookup(classification) {
        Some(target) => DispatchState::Specialized {
            guard,
            target: Target::Static(target),
            fallback: generic,
        },
        None => DispatchState::Generic(generic),
    }
}

/// Run the operands that triggered linking through the new state.
///
/// A freshly built specialized state was derived from these operands, so
/// its guard holds and is not re-evaluated.
fn first_invocation(operator: Operator, state: &DispatchState, args: &[Value]) -> EvalResult {
    match state {
        DispatchState::Specialized { target, .. } | DispatchState::Generic(target) => {
            target.invoke(args)
        }
        DispatchState::Terminal(terminal) => terminal.invoke(),
        DispatchState::Unlinked => Target::Static(generic_target(operator)).invoke(args),
    }
}
