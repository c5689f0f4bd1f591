//! CLI command implementations.

mod elements;
mod eval;

pub use elements::{build_elements, representation_name, ElementsReport};
pub use eval::{eval_operator, render_value, EvalOutcome};
