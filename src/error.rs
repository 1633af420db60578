//! Top-level plugin error.

use thiserror::Error;

use crate::compile::CompileError;
use crate::config::ConfigError;
use crate::emit::MinifyError;
use crate::transform::TransformerError;

/// Error returned by plugin construction and fallible hooks.
///
/// Every variant is local to the current build cycle; the plugin never
/// retries.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The code transformer failed on a module. Nothing was recorded for it.
    #[error("failed to transform \"{id}\": {source}")]
    Transform {
        id: String,
        #[source]
        source: TransformerError,
    },

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Minify(#[from] MinifyError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The builder was finished without a required collaborator.
    #[error("no {0} was provided to the plugin builder")]
    MissingCollaborator(&'static str),
}
