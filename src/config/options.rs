//! Plugin options.
//!
//! [`PluginOptions`] is resolved once when the plugin is built and never
//! changes afterwards. Every field has a default, so an empty YAML or JSON
//! document is a valid configuration.
//!
//! # Example
//!
//! ```rust
//! use stylex_plugin::PluginOptions;
//!
//! let options = PluginOptions::from_yaml_str(r#"
//! dev: false
//! fileName: assets/app.css
//! importSources: ["@stylexjs/stylex"]
//! classNamePrefix: app
//! passthrough:
//!   customFlag: true
//! "#).unwrap();
//!
//! assert_eq!(options.file_name, "assets/app.css");
//! assert!(options.passthrough.contains_key("customFlag"));
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::ConfigError;
use crate::compile::LayerMode;

/// Default name of the generated stylesheet.
pub const DEFAULT_FILE_NAME: &str = "stylex.css";

/// Default prefix of the virtual stylesheet module.
pub const DEFAULT_VIRTUAL_MODULE_PREFIX: &str = "virtual:";

/// Import names that gate extraction when none are configured.
pub const DEFAULT_IMPORT_SOURCES: &[&str] = &["stylex", "@stylexjs/stylex"];

/// Returns the development flag implied by the process environment.
///
/// Development mode is on when either `NODE_ENV` or `BABEL_ENV` is
/// `"development"`.
pub fn dev_from_env() -> bool {
    ["NODE_ENV", "BABEL_ENV"]
        .iter()
        .any(|key| std::env::var(key).map(|v| v == "development").unwrap_or(false))
}

/// How the extraction capability resolves imported modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModuleResolutionKind {
    #[default]
    #[serde(rename = "commonJS")]
    CommonJs,
    #[serde(rename = "haste")]
    Haste,
    #[serde(rename = "experimental_crossFileParsing")]
    CrossFileParsing,
}

/// Module resolution strategy forwarded to the extraction capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModuleResolution {
    #[serde(rename = "type")]
    pub kind: ModuleResolutionKind,
    pub root_dir: PathBuf,
}

impl Default for ModuleResolution {
    fn default() -> Self {
        Self {
            kind: ModuleResolutionKind::default(),
            root_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

/// Plugin and preset lists handed to the code transformer untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformerConfig {
    pub plugins: Vec<Value>,
    pub presets: Vec<Value>,
}

/// All recognised plugin options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginOptions {
    /// Serve the stylesheet as a virtual module instead of emitting an asset.
    pub dev: bool,
    pub module_resolution: ModuleResolution,
    /// Asset file name, also the suffix of the virtual module id.
    pub file_name: String,
    pub virtual_module_prefix: String,
    pub transformer: TransformerConfig,
    /// Modules referencing none of these names skip extraction entirely.
    pub import_sources: Vec<String>,

    /// Prefix for generated class names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name_prefix: Option<String>,
    /// Convert `px` font sizes to `rem`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_rem_for_font_size: Option<bool>,
    /// Inject styles at runtime instead of relying on the stylesheet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_injection: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gen_conditional_classes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treeshake_compensation: Option<bool>,

    /// Output shape of the built-in rule compiler.
    pub layer_mode: LayerMode,

    /// Extra extraction options forwarded verbatim.
    pub passthrough: Map<String, Value>,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            dev: dev_from_env(),
            module_resolution: ModuleResolution::default(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            virtual_module_prefix: DEFAULT_VIRTUAL_MODULE_PREFIX.to_string(),
            transformer: TransformerConfig::default(),
            import_sources: DEFAULT_IMPORT_SOURCES.iter().map(|s| s.to_string()).collect(),
            class_name_prefix: None,
            use_rem_for_font_size: None,
            runtime_injection: None,
            gen_conditional_classes: None,
            treeshake_compensation: None,
            layer_mode: LayerMode::default(),
            passthrough: Map::new(),
        }
    }
}

impl PluginOptions {
    /// Creates options with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the development flag.
    pub fn dev(mut self, dev: bool) -> Self {
        self.dev = dev;
        self
    }

    /// Sets the stylesheet file name.
    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Sets the virtual module prefix.
    pub fn virtual_module_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.virtual_module_prefix = prefix.into();
        self
    }

    /// Replaces the import names that gate extraction.
    pub fn import_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.import_sources = sources.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the built-in compiler's layer mode.
    pub fn layer_mode(mut self, mode: LayerMode) -> Self {
        self.layer_mode = mode;
        self
    }

    /// Adds a passthrough extraction option.
    pub fn passthrough(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.passthrough.insert(key.into(), value.into());
        self
    }

    /// Parses options from a YAML document.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_yaml::from_str(source)?;
        options.validate()?;
        Ok(options)
    }

    /// Parses options from a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(source)?;
        options.validate()?;
        Ok(options)
    }

    /// Loads options from a `.yaml`, `.yml` or `.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let parse: fn(&str) -> Result<Self, ConfigError> = match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str,
            Some("json") => Self::from_json_str,
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        parse(&source)
    }

    /// Checks that the options describe a usable plugin.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the file name is empty or ends in a
    /// separator, or if no import sources are configured.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.file_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "fileName",
                reason: "must not be empty".to_string(),
            });
        }
        if self.file_name.ends_with('/') || self.file_name.ends_with('\\') {
            return Err(ConfigError::Invalid {
                field: "fileName",
                reason: format!("\"{}\" names a directory, not a file", self.file_name),
            });
        }
        if self.import_sources.iter().all(|s| s.is_empty()) {
            return Err(ConfigError::Invalid {
                field: "importSources",
                reason: "at least one non-empty import name is required".to_string(),
            });
        }
        Ok(())
    }
}
