//! Call sites.
//!
//! A `CallSite` is owned by one compiled location. Its dispatch state is a
//! single interior-mutable slot that moves at most
//! `Unlinked -> Specialized -> Generic` (or `Unlinked -> Generic`, or
//! `Unlinked -> Terminal`) and never back.
//!
//! The slot holds a shared state. It is read with a short-lived lock and
//! the `Arc` is cloned out before running a target, so targets may re-enter
//! any site, including this one. Only an `Unlinked` slot accepts a
//! bootstrap's state; a bootstrap that loses the race runs through the
//! state already installed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use rill_value::{arity_mismatch, EvalResult, Value};

use crate::chain::{DispatchState, LinkKind, Target};
use crate::config::LinkerConfig;
use crate::linker;
use crate::operator::Operator;
use crate::signature::CallSignature;

/// Per-site counters.
#[derive(Debug, Default)]
struct SiteStats {
    invocations: AtomicU64,
    bootstraps: AtomicU64,
    guard_checks: AtomicU64,
    relinks: AtomicU64,
}

/// Point-in-time copy of a site's counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub invocations: u64,
    pub bootstraps: u64,
    pub guard_checks: u64,
    pub relinks: u64,
}

/// One dynamically dispatched operation location.
#[derive(Debug)]
pub struct CallSite {
    operator: Operator,
    signature: CallSignature,
    config: LinkerConfig,
    state: RwLock<Arc<DispatchState>>,
    stats: SiteStats,
}

impl CallSite {
    pub(crate) fn new(operator: Operator, signature: CallSignature, config: LinkerConfig) -> Self {
        CallSite {
            operator,
            signature,
            config,
            state: RwLock::new(Arc::new(DispatchState::Unlinked)),
            stats: SiteStats::default(),
        }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn signature(&self) -> &CallSignature {
        &self.signature
    }

    pub fn config(&self) -> &LinkerConfig {
        &self.config
    }

    /// Snapshot of the installed state.
    pub fn state(&self) -> DispatchState {
        (**self.state.read()).clone()
    }

    pub fn link_kind(&self) -> LinkKind {
        self.state.read().kind()
    }

    pub fn stats(&self) -> StatsSnapshot {
        StatsSnapshot {
            invocations: self.stats.invocations.load(Ordering::Relaxed),
            bootstraps: self.stats.bootstraps.load(Ordering::Relaxed),
            guard_checks: self.stats.guard_checks.load(Ordering::Relaxed),
            relinks: self.stats.relinks.load(Ordering::Relaxed),
        }
    }

    /// Run the operation on `args`, linking the site on first use.
    pub fn invoke(&self, args: &[Value]) -> EvalResult {
        if !self.signature.accepts(args.len()) {
            return Err(arity_mismatch(
                self.operator.name(),
                self.signature.expected_operands(),
                args.len(),
            ));
        }
        self.stats.invocations.fetch_add(1, Ordering::Relaxed);

        let state = Arc::clone(&*self.state.read());
        self.run(&state, args)
    }

    /// Dispatch `args` through `state`.
    pub(crate) fn run(&self, state: &DispatchState, args: &[Value]) -> EvalResult {
        match state {
            DispatchState::Unlinked => linker::bootstrap(self, args),
            DispatchState::Specialized {
                guard,
                target,
                fallback,
            } => {
                self.stats.guard_checks.fetch_add(1, Ordering::Relaxed);
                if guard.test(args) {
                    target.invoke(args)
                } else {
                    tracing::trace!(operator = %self.operator, "guard miss");
                    self.relink_to_generic(fallback, args)
                }
            }
            DispatchState::Generic(target) => target.invoke(args),
            DispatchState::Terminal(terminal) => terminal.invoke(),
        }
    }

    /// Megamorphic collapse: install the fallback for good, then run it.
    #[cold]
    fn relink_to_generic(&self, fallback: &Target, args: &[Value]) -> EvalResult {
        {
            let mut state = self.state.write();
            if matches!(**state, DispatchState::Specialized { .. }) {
                tracing::debug!(
                    operator = %self.operator,
                    target = %fallback.describe(),
                    "link: guard failed, relinked to generic"
                );
                *state = Arc::new(DispatchState::Generic(fallback.clone()));
                self.stats.relinks.fetch_add(1, Ordering::Relaxed);
            }
        }
        fallback.invoke(args)
    }

    /// Fill an unlinked slot with `state`.
    ///
    /// A slot that another bootstrap already linked keeps its state, which
    /// is returned as the error.
    pub(crate) fn install(
        &self,
        state: DispatchState,
    ) -> Result<Arc<DispatchState>, Arc<DispatchState>> {
        let mut slot = self.state.write();
        if matches!(**slot, DispatchState::Unlinked) {
            let installed = Arc::new(state);
            *slot = Arc::clone(&installed);
            Ok(installed)
        } else {
            Err(Arc::clone(&*slot))
        }
    }

    pub(crate) fn record_bootstrap(&self) {
        self.stats.bootstraps.fetch_add(1, Ordering::Relaxed);
    }
}
