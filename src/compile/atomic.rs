//! Built-in compiler for atomic style rules.
//!
//! [`AtomicRuleCompiler`] turns the rules collected from every module into a
//! single stylesheet:
//!
//! 1. **Order**: rules are stably sorted by priority
//! 2. **Group**: consecutive rules sharing `floor(priority / 1000)` form a group
//! 3. **Deduplicate**: within a group, one rule per class name survives. It
//!    keeps the position of the first occurrence and the value of the last
//! 4. **Render**: rules with an RTL variant become two rules scoped by the
//!    document direction
//!
//! # Layer Modes
//!
//! | Mode | Priority enforcement |
//! |------|----------------------|
//! | [`LayerMode::Layers`] | Cascade layers: `@layer priority1, priority2, ...;` |
//! | [`LayerMode::Specificity`] | Selectors bumped with `:not(#\#)` per priority level |
//!
//! # Example
//!
//! ```rust
//! use stylex_plugin::{AtomicRuleCompiler, RuleCompiler, StyleRule};
//!
//! let css = AtomicRuleCompiler::default()
//!     .compile_rules(&[
//!         StyleRule::new("x1", ".x1{color:red}", 3000.0),
//!         StyleRule::new("x1", ".x1{color:red}", 3000.0),
//!     ])
//!     .unwrap();
//!
//! assert_eq!(css.matches(".x1{color:red}").count(), 1);
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::compiler::RuleCompiler;
use super::error::CompileError;
use crate::rules::StyleRule;

const LTR_ANCESTOR: &str = "html:not([dir='rtl'])";
const RTL_ANCESTOR: &str = "html[dir='rtl']";
const SPECIFICITY_BUMP: &str = ":not(#\\#)";

/// Largest priority magnitude accepted. Real priorities stay in the low
/// thousands; anything past this would expand into absurd selectors.
pub const MAX_PRIORITY: f64 = 1_000_000.0;

/// How priority groups are kept apart in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerMode {
    /// Wrap each priority group in its own cascade layer.
    #[default]
    Layers,
    /// Raise selector specificity instead of using layers.
    Specificity,
}

/// The default [`RuleCompiler`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AtomicRuleCompiler {
    mode: LayerMode,
}

impl AtomicRuleCompiler {
    /// Creates a compiler with the given layer mode.
    pub fn new(mode: LayerMode) -> Self {
        Self { mode }
    }

    /// Returns the layer mode.
    pub fn mode(&self) -> LayerMode {
        self.mode
    }

    fn render_rule(&self, rule: &StyleRule, level: i64) -> Vec<String> {
        let (ltr, rtl) = match self.mode {
            LayerMode::Layers => (rule.ltr.clone(), rule.rtl.clone()),
            LayerMode::Specificity => (
                add_specificity_level(&rule.ltr, level),
                rule.rtl.as_deref().map(|rtl| add_specificity_level(rtl, level)),
            ),
        };

        match rtl {
            Some(rtl) => vec![
                add_ancestor_selector(&ltr, LTR_ANCESTOR),
                add_ancestor_selector(&rtl, RTL_ANCESTOR),
            ],
            None => vec![ltr],
        }
    }
}

struct PriorityGroup<'a> {
    level: i64,
    first_priority: f64,
    rules: IndexMap<&'a str, &'a StyleRule>,
}

impl RuleCompiler for AtomicRuleCompiler {
    fn compile_rules(&self, rules: &[StyleRule]) -> Result<String, CompileError> {
        if let Some(bad) = rules
            .iter()
            .find(|r| !r.priority.is_finite() || r.priority.abs() > MAX_PRIORITY)
        {
            return Err(CompileError::InvalidPriority {
                class_name: bad.class_name.clone(),
                priority: bad.priority,
            });
        }
        if rules.is_empty() {
            return Ok(String::new());
        }

        let mut sorted: Vec<&StyleRule> = rules.iter().collect();
        sorted.sort_by(|a, b| a.priority.total_cmp(&b.priority));

        let mut groups: Vec<PriorityGroup<'_>> = Vec::new();
        for rule in sorted {
            let level = priority_level(rule.priority);
            match groups.last_mut() {
                Some(group) if group.level == level => {
                    group.rules.insert(rule.class_name.as_str(), rule);
                }
                _ => {
                    let mut group = PriorityGroup {
                        level,
                        first_priority: rule.priority,
                        rules: IndexMap::new(),
                    };
                    group.rules.insert(rule.class_name.as_str(), rule);
                    groups.push(group);
                }
            }
        }

        let use_layers = self.mode == LayerMode::Layers;
        let header = if use_layers {
            let names: Vec<String> = (1..=groups.len())
                .map(|i| format!("priority{}", i))
                .collect();
            format!("\n@layer {};\n", names.join(", "))
        } else {
            String::new()
        };

        let body: Vec<String> = groups
            .iter()
            .enumerate()
            .map(|(index, group)| {
                let css = group
                    .rules
                    .values()
                    .flat_map(|rule| self.render_rule(rule, group.level))
                    .collect::<Vec<_>>()
                    .join("\n");
                if use_layers && group.first_priority > 0.0 {
                    format!("@layer priority{}{{\n{}\n}}", index + 1, css)
                } else {
                    css
                }
            })
            .collect();

        Ok(header + &body.join("\n"))
    }
}

/// `floor(priority / 1000)`; callers have already bounded `priority`.
fn priority_level(priority: f64) -> i64 {
    (priority / 1000.0).floor() as i64
}

/// Scopes a rule under an ancestor selector.
///
/// At-rules get the ancestor inserted after their opening brace.
fn add_ancestor_selector(rule: &str, ancestor: &str) -> String {
    if !rule.starts_with('@') {
        return format!("{} {}", ancestor, rule);
    }
    match rule.find('{') {
        Some(brace) => format!("{}{{{} {}", &rule[..brace], ancestor, &rule[brace + 1..]),
        None => format!("{} {}", ancestor, rule),
    }
}

/// Repeats a specificity bump `level` times just before the rule's
/// pseudo-element or declaration block. Levels below one add nothing.
fn add_specificity_level(rule: &str, level: i64) -> String {
    let count = match usize::try_from(level) {
        Ok(count) if count > 0 && !rule.starts_with("@keyframes") => count,
        _ => return rule.to_string(),
    };
    let split = rule
        .find("::")
        .or_else(|| rule.rfind('{'))
        .unwrap_or(rule.len());
    format!(
        "{}{}{}",
        &rule[..split],
        SPECIFICITY_BUMP.repeat(count),
        &rule[split..]
    )
}
