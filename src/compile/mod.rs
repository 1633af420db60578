//! Stylesheet compilation.
//!
//! [`compile_stylesheet`] flattens a [`RuleStore`](crate::RuleStore) and hands
//! the result to a [`RuleCompiler`]. It never emits an empty stylesheet: an
//! empty store compiles to `None`.
//!
//! [`AtomicRuleCompiler`] is the built-in rule compiler. Hosts that bring
//! their own rule processing implement [`RuleCompiler`] instead.

mod atomic;
mod compiler;
mod error;

pub use atomic::{AtomicRuleCompiler, LayerMode, MAX_PRIORITY};
pub use compiler::{compile_stylesheet, RuleCompiler};
pub use error::CompileError;
