//! How the compiled stylesheet reaches the application.
//!
//! - [`EmissionTarget`]: virtual module (development) or asset (production)
//! - [`VirtualModule`]: the public/internal id pair of the virtual stylesheet
//! - [`EmittedAsset`]: the production stylesheet handed to the host
//! - [`CssMinifier`]: the host's CSS pipeline stage, with
//!   [`CssparserMinifier`] as the built-in implementation

mod asset;
mod minify;
mod virtual_module;

pub use asset::{EmissionTarget, EmittedAsset};
pub use minify::{CssMinifier, CssparserMinifier, MinifyError};
pub use virtual_module::{VirtualModule, VIRTUAL_MARKER};
