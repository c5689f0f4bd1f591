//! Rill Dispatch - adaptive linking of dynamically typed operation sites.
//!
//! This crate provides:
//! - `Linker`: turns a linkage request (operator name plus call signature)
//!   into an unlinked `CallSite`
//! - `CallSite`: links itself on first use from the operands it sees, and
//!   collapses to the generic target the first time its guard fails
//! - Static specialization tables, generic targets and per-family terminal
//!   targets
//!
//! # Linking
//!
//! The first invocation of a site classifies its operands and installs
//! `guard ? specialized : relink-to-generic`. A guard failure installs the
//! generic target permanently, so each site pays for at most one
//! specialization attempt and one relink. If linking itself runs out of
//! stack budget the site is parked on a terminal target that raises a
//! `RangeError` on every call, and other sites are unaffected.
//!
//! # Configuration
//!
//! `LinkerConfig` (via `LinkerBuilder` or `RILL_LINK_MODE` /
//! `RILL_LINK_DEPTH`) selects adaptive or generic-only linking and the
//! linking stack budget.

mod chain;
mod concat;
mod config;
mod descriptor;
mod exhaustion;
pub mod generic;
mod invoke;
mod lattice;
mod linker;
mod operator;
mod signature;
mod site;
pub mod specialized;

pub use chain::{DispatchState, Guard, LinkKind, OpFn, StaticTarget, Target};
pub use concat::{fixed_target as concat_fixed_target, ConcatBudget, DEFAULT_CHARS_PER_ARG};
pub use config::{LinkMode, LinkerBuilder, LinkerConfig, LINK_DEPTH_VAR, LINK_MODE_VAR};
pub use descriptor::{descriptor, generic_target, Descriptor, OperandShape, Specialization};
pub use exhaustion::TerminalTarget;
pub use invoke::InvokeKind;
pub use lattice::{classify, classify_pair, Classification};
pub use linker::{LinkError, Linker};
pub use operator::{Operator, OperatorFamily};
pub use signature::{CallSignature, ParamKind, ReturnKind, CONCAT_MAX_ARITY};
pub use site::{CallSite, StatsSnapshot};
