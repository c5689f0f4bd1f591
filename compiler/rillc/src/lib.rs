//! Rill driver.
//!
//! Library half of the `rill` binary: operand literal parsing, a handful of
//! built-in functions for exercising `call`/`construct`/`super` sites, and
//! the `eval` and `elements` commands. Kept as a library so the commands
//! can be tested without spawning the binary.

pub mod builtins;
pub mod commands;
pub mod literal;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Filter used by `--trace` when no filter variable is set.
pub const TRACE_DIRECTIVES: &str = "rill_dispatch=trace,rill_elements=debug";

/// Install the global tracing subscriber, at most once per process.
///
/// Output is enabled by `RILL_LOG` (preferred) or `RUST_LOG`, which hold
/// `EnvFilter` directives. `force` (the `--trace` flag) enables output
/// without either variable and switches to indented span trees.
pub fn init_tracing(force: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let directives = std::env::var("RILL_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok()
            .or_else(|| force.then(|| TRACE_DIRECTIVES.to_string()));
        let Some(directives) = directives else {
            return;
        };

        let tree = force.then(|| {
            tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_bracketed_fields(true)
        });
        let flat = (!force).then(|| {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr)
        });
        tracing_subscriber::registry()
            .with(EnvFilter::new(directives))
            .with(tree)
            .with(flat)
            .init();
    });
}
