//! Rule extraction adapter.
//!
//! [`RuleExtractor`] decides whether a module needs the code transformer at
//! all, builds the request for it, and maps transformer failures onto
//! [`PluginError::Transform`].

use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use super::transformer::{CodeTransformer, Dialect, TransformRequest, TransformResult};
use crate::config::{ModuleResolution, PluginOptions};
use crate::error::PluginError;

/// Options handed to the style extraction capability.
///
/// Serializes with camelCase keys, passthrough values flattened in, which is
/// the shape extraction plugins expect.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionOptions {
    pub dev: bool,
    #[serde(rename = "unstable_moduleResolution")]
    pub module_resolution: ModuleResolution,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_rem_for_font_size: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_injection: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gen_conditional_classes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treeshake_compensation: Option<bool>,
    #[serde(flatten)]
    pub passthrough: Map<String, Value>,
}

impl From<&PluginOptions> for ExtractionOptions {
    fn from(options: &PluginOptions) -> Self {
        Self {
            dev: options.dev,
            module_resolution: options.module_resolution.clone(),
            class_name_prefix: options.class_name_prefix.clone(),
            use_rem_for_font_size: options.use_rem_for_font_size,
            runtime_injection: options.runtime_injection,
            gen_conditional_classes: options.gen_conditional_classes,
            treeshake_compensation: options.treeshake_compensation,
            passthrough: options.passthrough.clone(),
        }
    }
}

/// Picks the syntax dialect from a module id's extension.
///
/// Query strings and fragments are ignored. Extensions starting with `js`
/// select Flow; everything else is parsed as TypeScript.
pub fn dialect_for(id: &str) -> Dialect {
    let path = id.split(['?', '#']).next().unwrap_or(id);
    let is_js = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase().starts_with("js"))
        .unwrap_or(false);

    if is_js {
        Dialect::Flow
    } else {
        Dialect::TypeScript
    }
}

/// Runs the code transformer over modules that reference a style import.
pub struct RuleExtractor {
    import_sources: Vec<String>,
    plugins: Vec<Value>,
    presets: Vec<Value>,
    extraction: ExtractionOptions,
    transformer: Box<dyn CodeTransformer>,
}

impl RuleExtractor {
    /// Creates an extractor from resolved options.
    pub fn new(options: &PluginOptions, transformer: Box<dyn CodeTransformer>) -> Self {
        Self {
            import_sources: options
                .import_sources
                .iter()
                .filter(|s| !s.is_empty())
                .cloned()
                .collect(),
            plugins: options.transformer.plugins.clone(),
            presets: options.transformer.presets.clone(),
            extraction: ExtractionOptions::from(options),
            transformer,
        }
    }

    /// Returns the options forwarded to the extraction capability.
    pub fn extraction_options(&self) -> &ExtractionOptions {
        &self.extraction
    }

    /// Returns true if the source mentions any configured import name.
    pub fn references_import(&self, source: &str) -> bool {
        self.import_sources
            .iter()
            .any(|name| source.contains(name.as_str()))
    }

    /// Transforms a module if it references a style import.
    ///
    /// Returns `Ok(None)` when the module mentions no import name; the host
    /// should keep the module as is.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Transform`] if the transformer fails.
    pub fn extract(&self, source: &str, id: &str) -> Result<Option<TransformResult>, PluginError> {
        if !self.references_import(source) {
            return Ok(None);
        }

        let request = TransformRequest {
            source,
            file_name: id,
            dialect: dialect_for(id),
            jsx: true,
            plugins: &self.plugins,
            presets: &self.presets,
            extraction: &self.extraction,
        };

        self.transformer
            .transform(&request)
            .map(Some)
            .map_err(|source| PluginError::Transform {
                id: id.to_string(),
                source,
            })
    }
}

impl std::fmt::Debug for RuleExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleExtractor")
            .field("import_sources", &self.import_sources)
            .field("extraction", &self.extraction)
            .finish_non_exhaustive()
    }
}
