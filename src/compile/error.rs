//! Stylesheet compilation errors.

use thiserror::Error;

/// Error returned when a rule list cannot be turned into CSS.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// A rule's priority is NaN, infinite, or beyond
    /// [`MAX_PRIORITY`](super::MAX_PRIORITY) in magnitude.
    #[error("rule `{class_name}` has an unusable priority ({priority})")]
    InvalidPriority { class_name: String, priority: f64 },

    /// A custom rule compiler reported a failure.
    #[error("rule compilation failed: {0}")]
    Failed(String),
}
