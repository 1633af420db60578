//! Build-time aggregation of atomic style rules.
//!
//! Modules written against a StyleX-style API declare styles in source code. A
//! code transformer rewrites each module to reference generated class names
//! and reports the atomic rules it extracted. This crate collects those rules
//! across a build cycle, one entry per module, and turns them into a single
//! stylesheet:
//!
//! - **development**: served as a virtual module, recompiled on every load
//! - **production**: emitted once as a static asset and linked from every
//!   HTML entry document
//!
//! # Modules
//!
//! - [`config`]: plugin options and the host configuration the plugin reads
//! - [`rules`]: [`StyleRule`] and the per-cycle [`RuleStore`]
//! - [`transform`]: the [`CodeTransformer`] seam and the import-gated
//!   [`RuleExtractor`]
//! - [`compile`]: [`RuleCompiler`] and the built-in [`AtomicRuleCompiler`]
//! - [`emit`]: emission targets, the virtual module ids and [`CssMinifier`]
//! - [`html`]: stylesheet link tags for entry documents
//! - [`plugin`]: [`StylexPlugin`], one method per host hook
//!
//! # Quick Start
//!
//! ```rust
//! use stylex_plugin::{
//!     HostConfig, PluginOptions, StyleRule, StylexPlugin, TransformMeta,
//!     TransformRequest, TransformResult, TransformerError,
//! };
//!
//! fn transformer(req: &TransformRequest<'_>) -> Result<TransformResult, TransformerError> {
//!     let rule = StyleRule::new("x1e2nbdu", ".x1e2nbdu{color:red}", 3000.0);
//!     Ok(TransformResult {
//!         code: Some(req.source.replace("styles.root", "\"x1e2nbdu\"")),
//!         map: None,
//!         meta: TransformMeta::with_rules(vec![rule]),
//!     })
//! }
//!
//! let mut plugin = StylexPlugin::builder()
//!     .options(PluginOptions::new().dev(false))
//!     .transformer(transformer)
//!     .build()
//!     .unwrap();
//!
//! plugin.config_resolved(HostConfig::new("/app/"));
//! plugin.build_start();
//! plugin
//!     .transform("import * as stylex from '@stylexjs/stylex'; styles.root", "/src/App.tsx")
//!     .unwrap();
//!
//! let asset = plugin.generate_bundle().unwrap().unwrap();
//! assert!(asset.source.contains(".x1e2nbdu{color:red}"));
//!
//! let html = plugin.transform_index_html("<html><head></head></html>").unwrap();
//! assert_eq!(html.tags[0].attr("href"), Some("/app/stylex.css"));
//! ```

pub mod compile;
pub mod config;
pub mod emit;
mod error;
pub mod html;
pub mod plugin;
pub mod rules;
pub mod transform;

pub use compile::{
    compile_stylesheet, AtomicRuleCompiler, CompileError, LayerMode, RuleCompiler, MAX_PRIORITY,
};
pub use config::{
    dev_from_env, ConfigError, HostConfig, ModuleResolution, ModuleResolutionKind, PluginOptions,
    TransformerConfig, CSS_PLUGIN, CSS_POST_PLUGIN,
};
pub use emit::{
    CssMinifier, CssparserMinifier, EmissionTarget, EmittedAsset, MinifyError, VirtualModule,
};
pub use error::PluginError;
pub use html::{inject_tags, join_base, HtmlTag, HtmlTransformResult, InjectTo};
pub use plugin::{Enforce, StylexPlugin, StylexPluginBuilder, PLUGIN_NAME};
pub use rules::{RuleStore, StyleRule};
pub use transform::{
    dialect_for, CodeTransformer, Dialect, ExtractionOptions, RuleExtractor, TransformMeta,
    TransformRequest, TransformResult, TransformerError,
};
