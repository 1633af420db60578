//! Plugin configuration.
//!
//! - [`PluginOptions`]: user-facing options, loadable from YAML or JSON
//! - [`HostConfig`]: what the plugin learns from the host's resolved config
//! - [`ConfigError`]: loading and validation failures

mod error;
mod host;
mod options;

pub use error::ConfigError;
pub use host::{HostConfig, CSS_PLUGIN, CSS_POST_PLUGIN};
pub use options::{
    dev_from_env, ModuleResolution, ModuleResolutionKind, PluginOptions, TransformerConfig,
    DEFAULT_FILE_NAME, DEFAULT_IMPORT_SOURCES, DEFAULT_VIRTUAL_MODULE_PREFIX,
};
