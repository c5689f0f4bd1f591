//! Linker configuration.
//!
//! `LinkerConfig` is plain data copied into every call site. Build one
//! with [`LinkerBuilder`], or read overrides from the environment with
//! [`LinkerConfig::from_env`]:
//!
//! - `RILL_LINK_MODE=adaptive|generic`
//! - `RILL_LINK_DEPTH=<n>`: maximum nesting of first-use linkages

use std::fmt;
use std::str::FromStr;

use rill_stack::StackBudget;

use crate::concat::DEFAULT_CHARS_PER_ARG;
use crate::signature::CONCAT_MAX_ARITY;

pub const LINK_MODE_VAR: &str = "RILL_LINK_MODE";
pub const LINK_DEPTH_VAR: &str = "RILL_LINK_DEPTH";

/// Whether sites may specialize.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LinkMode {
    /// Specialize on first use, collapse to generic on guard failure.
    #[default]
    Adaptive,
    /// Link every site straight to its generic target.
    GenericOnly,
}

impl LinkMode {
    #[inline]
    pub fn specializes(self) -> bool {
        matches!(self, LinkMode::Adaptive)
    }
}

impl FromStr for LinkMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "adaptive" => Ok(LinkMode::Adaptive),
            "generic" | "generic-only" => Ok(LinkMode::GenericOnly),
            other => Err(format!("unknown link mode `{other}`")),
        }
    }
}

impl fmt::Display for LinkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LinkMode::Adaptive => "adaptive",
            LinkMode::GenericOnly => "generic",
        })
    }
}

/// Settings shared by every site a linker creates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkerConfig {
    pub mode: LinkMode,
    /// Budget for first-use linking.
    pub stack: StackBudget,
    /// Per-operand length budget of the specialized concat guard.
    pub concat_chars_per_arg: usize,
    /// Widest concat site that specializes, in `2..=10`.
    pub concat_max_arity: usize,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        LinkerConfig {
            mode: LinkMode::default(),
            stack: StackBudget::default(),
            concat_chars_per_arg: DEFAULT_CHARS_PER_ARG,
            concat_max_arity: CONCAT_MAX_ARITY,
        }
    }
}

impl LinkerConfig {
    /// Defaults with environment overrides applied.
    ///
    /// Unparsable values are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides read through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut builder = LinkerBuilder::new();
        if let Some(raw) = lookup(LINK_MODE_VAR) {
            match raw.parse::<LinkMode>() {
                Ok(mode) => builder = builder.mode(mode),
                Err(reason) => tracing::warn!(var = LINK_MODE_VAR, %reason, "ignoring override"),
            }
        }
        if let Some(raw) = lookup(LINK_DEPTH_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(depth) => builder = builder.max_link_depth(depth),
                Err(err) => {
                    tracing::warn!(var = LINK_DEPTH_VAR, value = %raw, %err, "ignoring override");
                }
            }
        }
        builder.build()
    }
}

/// Builder for [`LinkerConfig`].
#[derive(Clone, Debug, Default)]
pub struct LinkerBuilder {
    config: LinkerConfig,
}

impl LinkerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(mut self, mode: LinkMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Replace the whole stack budget.
    #[must_use]
    pub fn stack_budget(mut self, budget: StackBudget) -> Self {
        self.config.stack = budget;
        self
    }

    /// Limit how deeply first-use linkages may nest.
    #[must_use]
    pub fn max_link_depth(mut self, depth: usize) -> Self {
        self.config.stack = self.config.stack.with_max_depth(depth);
        self
    }

    #[must_use]
    pub fn concat_chars_per_arg(mut self, chars: usize) -> Self {
        self.config.concat_chars_per_arg = chars;
        self
    }

    /// Widest specialized concat arity, clamped to `2..=10`.
    #[must_use]
    pub fn concat_max_arity(mut self, arity: usize) -> Self {
        self.config.concat_max_arity = arity.clamp(2, CONCAT_MAX_ARITY);
        self
    }

    pub fn build(self) -> LinkerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests;
