//! Rule extraction.
//!
//! - [`CodeTransformer`]: the external capability that parses a module and
//!   extracts its style rules
//! - [`RuleExtractor`]: gates modules on import names and drives the
//!   transformer
//! - [`TransformResult`] / [`TransformMeta`]: what a transform hands back to
//!   the host, rules included so cached modules can be reconciled later

mod extract;
mod transformer;

pub use extract::{dialect_for, ExtractionOptions, RuleExtractor};
pub use transformer::{
    CodeTransformer, Dialect, TransformMeta, TransformRequest, TransformResult, TransformerError,
};
