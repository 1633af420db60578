//! The code transformer capability.
//!
//! Parsing a module and extracting its style rules is delegated to a
//! [`CodeTransformer`]. The plugin only builds the [`TransformRequest`] and
//! consumes the [`TransformResult`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::extract::ExtractionOptions;
use crate::rules::StyleRule;

/// Source dialect syntax extension the transformer should enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Flow-typed JavaScript (`.js`, `.jsx`). `.mjs` and `.cjs` do not qualify.
    Flow,
    /// TypeScript (`.ts`, `.tsx`, ...).
    TypeScript,
}

/// Everything the transformer needs for one module.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformRequest<'a> {
    pub source: &'a str,
    /// Module identity, used as the file name for diagnostics.
    pub file_name: &'a str,
    pub dialect: Dialect,
    /// JSX syntax is always enabled.
    pub jsx: bool,
    /// Host-provided plugins, run before style extraction.
    pub plugins: &'a [Value],
    pub presets: &'a [Value],
    pub extraction: &'a ExtractionOptions,
}

/// Metadata attached to a transformed module.
///
/// Hosts cache this alongside the transformed code and hand it back through
/// [`StylexPlugin::should_transform_cached_module`](crate::StylexPlugin::should_transform_cached_module).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransformMeta {
    /// Rules extracted from the module.
    #[serde(default)]
    pub stylex: Vec<StyleRule>,
    /// Any other metadata the transformer reported.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TransformMeta {
    /// Creates metadata carrying only extracted rules.
    pub fn with_rules(rules: Vec<StyleRule>) -> Self {
        Self {
            stylex: rules,
            extra: Map::new(),
        }
    }
}

/// Output of a successful transform.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransformResult {
    /// Transformed code; `None` leaves the module's code unchanged.
    pub code: Option<String>,
    /// Source map, in whatever JSON shape the host understands.
    pub map: Option<Value>,
    pub meta: TransformMeta,
}

/// Error reported by a [`CodeTransformer`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformerError {
    /// The module's source could not be parsed.
    #[error("syntax error: {message}")]
    Syntax { message: String },

    /// The transformer rejected its configuration.
    #[error("invalid transformer configuration: {0}")]
    InvalidConfiguration(String),

    /// Any other transformer failure.
    #[error("{0}")]
    Other(String),
}

/// Parses a module and extracts its style rules.
///
/// Implementations must not return partial output: if extraction fails, the
/// whole call fails.
///
/// Closures with the matching signature implement this trait.
pub trait CodeTransformer: Send + Sync {
    /// Transforms one module.
    fn transform(&self, request: &TransformRequest<'_>) -> Result<TransformResult, TransformerError>;
}

impl<F> CodeTransformer for F
where
    F: Fn(&TransformRequest<'_>) -> Result<TransformResult, TransformerError> + Send + Sync,
{
    fn transform(&self, request: &TransformRequest<'_>) -> Result<TransformResult, TransformerError> {
        self(request)
    }
}
