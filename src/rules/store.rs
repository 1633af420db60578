//! Per-module rule storage for one build cycle.
//!
//! [`RuleStore`] maps module identities to the rules extracted from them. It is
//! the single source of truth for aggregation: every compiled stylesheet is
//! derived from a snapshot of the store.
//!
//! # Lifecycle
//!
//! 1. **Reset** at cycle start: every entry from the previous cycle is dropped
//! 2. **Record** as modules are transformed, or **reconcile** when the host
//!    reuses a cached transform
//! 3. **Read** in full at aggregation time, without consuming entries
//!
//! # Ordering
//!
//! Entries iterate in first-insertion order. Overwriting a module keeps its
//! original position, and forgetting a module leaves the relative order of
//! the others intact. Rule order within a module is preserved as recorded.

use indexmap::IndexMap;

use super::rule::StyleRule;

/// Insertion-ordered map from module identity to its extracted rules.
#[derive(Debug, Clone, Default)]
pub struct RuleStore {
    entries: IndexMap<String, Vec<StyleRule>>,
}

impl RuleStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every entry.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Records the rules for a module, replacing any previous entry.
    pub fn record(&mut self, id: impl Into<String>, rules: Vec<StyleRule>) {
        self.entries.insert(id.into(), rules);
    }

    /// Removes a module's entry, returning its rules if it had one.
    pub fn forget(&mut self, id: &str) -> Option<Vec<StyleRule>> {
        self.entries.shift_remove(id)
    }

    /// Restores a module's entry from cached transform metadata.
    ///
    /// Empty cached rules remove the entry, matching what a fresh transform
    /// of the same module would have recorded.
    pub fn reconcile(&mut self, id: &str, cached: &[StyleRule]) {
        if cached.is_empty() {
            self.forget(id);
        } else {
            self.record(id, cached.to_vec());
        }
    }

    /// Returns the rules recorded for a module.
    pub fn get(&self, id: &str) -> Option<&[StyleRule]> {
        self.entries.get(id).map(Vec::as_slice)
    }

    /// Returns true if the module has an entry.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of modules with an entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no module has an entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of rules across all modules, duplicates included.
    pub fn rule_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Iterates over `(module id, rules)` in store order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[StyleRule])> {
        self.entries
            .iter()
            .map(|(id, rules)| (id.as_str(), rules.as_slice()))
    }

    /// Concatenates every module's rules in store order.
    pub fn flatten(&self) -> Vec<StyleRule> {
        self.entries.values().flatten().cloned().collect()
    }
}
