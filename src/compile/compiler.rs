//! Stylesheet compilation from a rule store snapshot.

use super::error::CompileError;
use crate::rules::{RuleStore, StyleRule};

/// Turns an ordered rule list into CSS text.
///
/// Implementations own deduplication, ordering and rendering. They receive
/// every rule of the cycle at once ("collect all") in store order and must
/// be deterministic: the same input always yields byte-identical output.
///
/// Closures with the matching signature implement this trait, which keeps
/// test doubles short:
///
/// ```rust
/// use stylex_plugin::{compile_stylesheet, CompileError, RuleStore, StyleRule};
///
/// let names = |rules: &[StyleRule]| -> Result<String, CompileError> {
///     Ok(rules.iter().map(|r| r.class_name.as_str()).collect::<Vec<_>>().join(","))
/// };
///
/// let mut store = RuleStore::new();
/// store.record("a.tsx", vec![StyleRule::new("x1", ".x1{color:red}", 3000.0)]);
/// assert_eq!(compile_stylesheet(&store, &names).unwrap().as_deref(), Some("x1"));
/// ```
pub trait RuleCompiler: Send + Sync {
    /// Renders the rules as a stylesheet.
    fn compile_rules(&self, rules: &[StyleRule]) -> Result<String, CompileError>;
}

impl<F> RuleCompiler for F
where
    F: Fn(&[StyleRule]) -> Result<String, CompileError> + Send + Sync,
{
    fn compile_rules(&self, rules: &[StyleRule]) -> Result<String, CompileError> {
        self(rules)
    }
}

/// Compiles the store's current contents.
///
/// Rules are flattened in store order and handed to `compiler` unchanged.
/// Returns `Ok(None)` when the store holds no rules, so callers never produce
/// an empty stylesheet artifact.
pub fn compile_stylesheet(
    store: &RuleStore,
    compiler: &dyn RuleCompiler,
) -> Result<Option<String>, CompileError> {
    let rules = store.flatten();
    if rules.is_empty() {
        return Ok(None);
    }
    compiler.compile_rules(&rules).map(Some)
}
