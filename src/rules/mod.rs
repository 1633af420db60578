//! Style rules and the per-cycle rule store.
//!
//! - [`StyleRule`]: one atomic declaration extracted from a module
//! - [`RuleStore`]: module identity to rules, reset every build cycle

mod rule;
mod store;

pub use rule::StyleRule;
pub use store::RuleStore;
