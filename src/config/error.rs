//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

/// Error returned when plugin options cannot be loaded or are invalid.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The options file could not be read.
    #[error("failed to read options file \"{}\": {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The options file has an extension we don't know how to parse.
    #[error("unsupported options file format \"{}\" (expected .yaml, .yml or .json)", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// YAML options failed to deserialize.
    #[error("invalid YAML options: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON options failed to deserialize.
    #[error("invalid JSON options: {0}")]
    Json(#[from] serde_json::Error),

    /// An option has a value the plugin cannot work with.
    #[error("invalid option `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
