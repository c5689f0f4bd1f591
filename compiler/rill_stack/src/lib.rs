//! Stack budget and exhaustion detection for the Rill runtime.
//!
//! Two concerns live here:
//!
//! - [`ensure_sufficient_stack`] grows the native stack on demand for code
//!   that legitimately recurses deeply (call sites entering compiled
//!   methods that re-enter other sites).
//! - [`StackBudget`] guards work that must *not* grow the stack and must
//!   instead fail cleanly when the control stack is nearly exhausted. The
//!   call-site linker runs chain construction inside a budget scope, so an
//!   adversarially deep chain of first-use linkages turns into a
//!   [`StackExhausted`] error instead of an abort.
//!
//! # Platform Support
//!
//! - **Native targets**: Uses the `stacker` crate to measure and grow the stack.
//! - **WASM targets**: Growth is a passthrough and remaining-stack probes
//!   report `None`; only the nesting-depth limit applies.
//!
//! # Configuration
//!
//! - **Red zone**: 100KB - If less than this remains, we grow the stack
//! - **Growth size**: 1MB - Each growth allocates this much additional space
//! - **Link red zone**: 32KB - A budget scope fails below this
//! - **Link depth**: 512 nested budget scopes per thread

use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;

/// Minimum stack space to keep available (100KB red zone).
///
/// If less than this amount remains, we'll grow the stack.
pub const RED_ZONE: usize = 100 * 1024;

/// Default red zone of a [`StackBudget`] (32KB).
///
/// Smaller than [`RED_ZONE`], so code that just passed through
/// [`ensure_sufficient_stack`] can always open a budget scope.
pub const LINK_RED_ZONE: usize = 32 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Default limit on nested budget scopes per thread.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Ensure sufficient stack space is available before executing `f`.
///
/// If the remaining stack is below the red zone threshold, this will
/// allocate additional stack space before calling `f`.
///
/// # Example
///
/// ```text
/// fn enter(method: &MethodRef, invocation: Invocation<'_>) -> EvalResult {
///     ensure_sufficient_stack(|| method.invoke(invocation))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly (WASM has its own stack management).
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Remaining native stack in bytes, if the platform can measure it.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn remaining_stack() -> Option<usize> {
    stacker::remaining_stack()
}

/// WASM version - the stack cannot be measured.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn remaining_stack() -> Option<usize> {
    None
}

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Number of budget scopes currently open on this thread.
pub fn current_depth() -> usize {
    DEPTH.with(Cell::get)
}

/// The control stack ran out while a budget scope was being entered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackExhausted {
    /// Nesting depth at the moment of failure.
    pub depth: usize,
    /// Remaining native stack in bytes, when measurable.
    pub remaining: Option<usize>,
}

impl fmt::Display for StackExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.remaining {
            Some(bytes) => write!(
                f,
                "control stack exhausted at depth {} ({bytes} bytes remaining)",
                self.depth
            ),
            None => write!(f, "control stack exhausted at depth {}", self.depth),
        }
    }
}

impl std::error::Error for StackExhausted {}

/// Limits for work that must fail instead of growing the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackBudget {
    red_zone: usize,
    max_depth: usize,
}

impl Default for StackBudget {
    fn default() -> Self {
        Self::new(LINK_RED_ZONE, DEFAULT_MAX_DEPTH)
    }
}

impl StackBudget {
    /// Create a budget with an explicit red zone and nesting limit.
    pub const fn new(red_zone: usize, max_depth: usize) -> Self {
        Self {
            red_zone,
            max_depth,
        }
    }

    /// A budget that is already spent.
    ///
    /// Every [`enter`](Self::enter) fails. Used to force the exhaustion
    /// path deterministically.
    pub const fn exhausted() -> Self {
        Self::new(usize::MAX, 0)
    }

    /// Replace the nesting limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Replace the red zone.
    #[must_use]
    pub const fn with_red_zone(mut self, red_zone: usize) -> Self {
        self.red_zone = red_zone;
        self
    }

    pub const fn red_zone(&self) -> usize {
        self.red_zone
    }

    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Open a budget scope on the current thread.
    ///
    /// Fails if the thread already holds `max_depth` scopes or if less than
    /// the red zone remains on the native stack. The returned guard closes
    /// the scope when dropped.
    pub fn enter(&self) -> Result<BudgetScope, StackExhausted> {
        let depth = current_depth();
        if depth >= self.max_depth {
            return Err(StackExhausted {
                depth,
                remaining: remaining_stack(),
            });
        }
        if let Some(remaining) = remaining_stack() {
            if remaining < self.red_zone {
                return Err(StackExhausted {
                    depth,
                    remaining: Some(remaining),
                });
            }
        }
        DEPTH.with(|d| d.set(depth.saturating_add(1)));
        Ok(BudgetScope {
            _thread_bound: PhantomData,
        })
    }

    /// Run `f` inside a budget scope.
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> Result<R, StackExhausted> {
        let _scope = self.enter()?;
        Ok(f())
    }
}

/// An open budget scope. Closing happens on drop.
#[must_use = "the scope closes as soon as the guard is dropped"]
pub struct BudgetScope {
    // Scopes count per thread, so the guard must stay on its thread.
    _thread_bound: PhantomData<*const ()>,
}

impl Drop for BudgetScope {
    fn drop(&mut self) {
        DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

#[cfg(test)]
mod tests;
