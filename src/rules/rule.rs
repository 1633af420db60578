//! The atomic style rule.

use serde::{Deserialize, Serialize};

/// One atomic style declaration extracted from a module.
///
/// Rules serialize as the tuple the extraction capability produces,
/// `[className, {"ltr": ..., "rtl": ...}, priority]`, so module metadata can be
/// cached by the host and restored without conversion.
///
/// The aggregation engine treats rules as opaque values. Only a
/// [`RuleCompiler`](crate::RuleCompiler) looks inside them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RuleTuple", into = "RuleTuple")]
pub struct StyleRule {
    /// Generated class name, also the deduplication key.
    pub class_name: String,
    /// CSS text for left-to-right documents.
    pub ltr: String,
    /// CSS text for right-to-left documents, when it differs.
    pub rtl: Option<String>,
    /// Ordering priority; rules are grouped by `priority / 1000`.
    pub priority: f64,
}

impl StyleRule {
    /// Creates a rule without an RTL variant.
    pub fn new(class_name: impl Into<String>, ltr: impl Into<String>, priority: f64) -> Self {
        Self {
            class_name: class_name.into(),
            ltr: ltr.into(),
            rtl: None,
            priority,
        }
    }

    /// Adds an RTL variant.
    pub fn with_rtl(mut self, rtl: impl Into<String>) -> Self {
        self.rtl = Some(rtl.into());
        self
    }
}

#[derive(Serialize, Deserialize)]
struct RuleTuple(String, RuleBody, f64);

#[derive(Serialize, Deserialize)]
struct RuleBody {
    ltr: String,
    #[serde(default)]
    rtl: Option<String>,
}

impl From<RuleTuple> for StyleRule {
    fn from(RuleTuple(class_name, body, priority): RuleTuple) -> Self {
        Self {
            class_name,
            ltr: body.ltr,
            rtl: body.rtl,
            priority,
        }
    }
}

impl From<StyleRule> for RuleTuple {
    fn from(rule: StyleRule) -> Self {
        RuleTuple(
            rule.class_name,
            RuleBody {
                ltr: rule.ltr,
                rtl: rule.rtl,
            },
            rule.priority,
        )
    }
}
