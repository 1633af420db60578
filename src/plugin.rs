//! The plugin object and its hook surface.
//!
//! [`StylexPlugin`] owns the rule store for one build session and exposes one
//! method per host hook. Hosts call them in their usual lifecycle order:
//!
//! | Hook | Method | Effect |
//! |------|--------|--------|
//! | cycle start | [`build_start`](StylexPlugin::build_start) | reset the store |
//! | config resolved | [`config_resolved`](StylexPlugin::config_resolved) | capture base path and CSS stages |
//! | cached module reuse | [`should_transform_cached_module`](StylexPlugin::should_transform_cached_module) | restore the module's rules |
//! | module transform | [`transform`](StylexPlugin::transform) | extract and record rules |
//! | bundle finalize | [`generate_bundle`](StylexPlugin::generate_bundle) | compile and emit the asset |
//! | HTML finalize | [`transform_index_html`](StylexPlugin::transform_index_html) | add the stylesheet link |
//! | id resolution | [`resolve_id`](StylexPlugin::resolve_id) | map the virtual id |
//! | module load | [`load`](StylexPlugin::load) | serve the virtual stylesheet |
//!
//! The emission target is chosen once from [`PluginOptions::dev`]: development
//! serves a virtual module compiled on every load; production emits one asset
//! per cycle and links it from each HTML entry.
//!
//! # Example
//!
//! ```rust
//! use stylex_plugin::{
//!     PluginOptions, StyleRule, StylexPlugin, TransformMeta, TransformRequest,
//!     TransformResult, TransformerError,
//! };
//!
//! fn transformer(req: &TransformRequest<'_>) -> Result<TransformResult, TransformerError> {
//!     Ok(TransformResult {
//!         code: Some(req.source.to_string()),
//!         map: None,
//!         meta: TransformMeta::with_rules(vec![StyleRule::new("x1", ".x1{color:red}", 3000.0)]),
//!     })
//! }
//!
//! let mut plugin = StylexPlugin::builder()
//!     .options(PluginOptions::new().dev(false))
//!     .transformer(transformer)
//!     .build()
//!     .unwrap();
//!
//! plugin.build_start();
//! plugin.transform("import stylex from '@stylexjs/stylex';", "/src/App.tsx").unwrap();
//!
//! let asset = plugin.generate_bundle().unwrap().unwrap();
//! assert_eq!(asset.file_name, "stylex.css");
//! assert!(asset.source.contains(".x1{color:red}"));
//! ```

use tracing::{debug, info};

use crate::compile::{compile_stylesheet, AtomicRuleCompiler, RuleCompiler};
use crate::config::{HostConfig, PluginOptions};
use crate::emit::{CssMinifier, CssparserMinifier, EmissionTarget, EmittedAsset, VirtualModule};
use crate::error::PluginError;
use crate::html::{join_base, HtmlTag, HtmlTransformResult};
use crate::rules::RuleStore;
use crate::transform::{CodeTransformer, RuleExtractor, TransformMeta, TransformResult};

/// Name the plugin registers under.
pub const PLUGIN_NAME: &str = "vite-plugin-stylex";

/// When the host should run the plugin relative to others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enforce {
    Pre,
    Post,
}

/// Rule aggregation and stylesheet emission for one build session.
pub struct StylexPlugin {
    options: PluginOptions,
    target: EmissionTarget,
    extractor: RuleExtractor,
    compiler: Box<dyn RuleCompiler>,
    minifier: Box<dyn CssMinifier>,
    host: HostConfig,
    store: RuleStore,
}

impl StylexPlugin {
    /// Creates a new builder.
    pub fn builder() -> StylexPluginBuilder {
        StylexPluginBuilder::new()
    }

    /// The plugin's registered name.
    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    /// The plugin runs after the host's own transforms.
    pub fn enforce(&self) -> Enforce {
        Enforce::Post
    }

    pub fn options(&self) -> &PluginOptions {
        &self.options
    }

    pub fn emission_target(&self) -> &EmissionTarget {
        &self.target
    }

    pub fn host_config(&self) -> &HostConfig {
        &self.host
    }

    /// Read access to the current cycle's rules.
    pub fn store(&self) -> &RuleStore {
        &self.store
    }

    /// Starts a new build cycle, dropping every rule from the previous one.
    pub fn build_start(&mut self) {
        debug!(modules = self.store.len(), "resetting rule store");
        self.store.reset();
    }

    /// Captures the host's base path and which CSS stages it provides.
    pub fn config_resolved(&mut self, host: HostConfig) {
        debug!(
            base = %host.base,
            css_pipeline = host.css_pipeline_available(),
            "host configuration resolved"
        );
        self.host = host;
    }

    /// Restores a cached module's rules instead of re-running extraction.
    ///
    /// Always returns `false`: the cached transform is reused as is.
    pub fn should_transform_cached_module(&mut self, id: &str, meta: &TransformMeta) -> bool {
        debug!(module = %id, rules = meta.stylex.len(), "reconciling cached module");
        self.store.reconcile(id, &meta.stylex);
        false
    }

    /// Transforms a module and records its rules.
    ///
    /// Returns `Ok(None)` for modules that reference no configured import
    /// name; the host keeps them unchanged. Rules are recorded in both modes
    /// so the development virtual module always reflects the latest
    /// transforms. A module that yields no rules loses any entry it had.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Transform`] if the code transformer fails. The
    /// store is left untouched for that module.
    pub fn transform(&mut self, code: &str, id: &str) -> Result<Option<TransformResult>, PluginError> {
        let Some(result) = self.extractor.extract(code, id)? else {
            self.store.forget(id);
            return Ok(None);
        };

        if result.meta.stylex.is_empty() {
            self.store.forget(id);
        } else {
            debug!(module = %id, rules = result.meta.stylex.len(), "recorded style rules");
            self.store.record(id, result.meta.stylex.clone());
        }
        Ok(Some(result))
    }

    /// Compiles the current store.
    ///
    /// Returns `Ok(None)` when no module has any rules.
    pub fn compile(&self) -> Result<Option<String>, PluginError> {
        Ok(compile_stylesheet(&self.store, self.compiler.as_ref())?)
    }

    /// Compiles the final store into the production asset.
    ///
    /// Returns `Ok(None)` in development and when there are no rules. The CSS
    /// goes through the minifier only when the host provides its CSS
    /// pipeline stages.
    pub fn generate_bundle(&self) -> Result<Option<EmittedAsset>, PluginError> {
        let EmissionTarget::Asset { file_name } = &self.target else {
            return Ok(None);
        };

        let Some(css) = self.compile()? else {
            debug!(file_name = %file_name, "no style rules, skipping asset");
            return Ok(None);
        };

        let source = if self.host.css_pipeline_available() {
            self.minifier.minify(&css, file_name)?
        } else {
            css
        };

        info!(
            file_name = %file_name,
            modules = self.store.len(),
            bytes = source.len(),
            "emitting stylesheet"
        );
        Ok(Some(EmittedAsset {
            file_name: file_name.clone(),
            source,
        }))
    }

    /// Adds the stylesheet link to an HTML entry in production.
    ///
    /// Returns `None` in development, and when the store holds no rules so
    /// that no document links to an asset that was never emitted.
    pub fn transform_index_html(&self, html: &str) -> Option<HtmlTransformResult> {
        let EmissionTarget::Asset { file_name } = &self.target else {
            return None;
        };
        if self.store.rule_count() == 0 {
            debug!(file_name = %file_name, "no style rules, skipping stylesheet link");
            return None;
        }

        let href = join_base(&self.host.base, file_name);
        Some(HtmlTransformResult {
            html: html.to_string(),
            tags: vec![HtmlTag::stylesheet(href)],
        })
    }

    /// Maps the public virtual id to its internal form in development.
    pub fn resolve_id(&self, id: &str) -> Option<String> {
        match &self.target {
            EmissionTarget::Virtual(module) => module.resolve(id).map(str::to_owned),
            EmissionTarget::Asset { .. } => None,
        }
    }

    /// Serves the virtual stylesheet, compiled fresh from the current store.
    ///
    /// Accepts either the public or the internal id. Returns `Ok(None)` for
    /// any other id and always in production. With no rules recorded yet the
    /// module loads as empty content.
    pub fn load(&self, id: &str) -> Result<Option<String>, PluginError> {
        match &self.target {
            EmissionTarget::Virtual(module) if module.matches(id) => {
                Ok(Some(self.compile()?.unwrap_or_default()))
            }
            _ => Ok(None),
        }
    }
}

impl std::fmt::Debug for StylexPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StylexPlugin")
            .field("target", &self.target)
            .field("host", &self.host)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

/// Builder for [`StylexPlugin`].
///
/// A code transformer is required. The rule compiler defaults to
/// [`AtomicRuleCompiler`] in the configured layer mode and the minifier to
/// [`CssparserMinifier`].
#[derive(Default)]
pub struct StylexPluginBuilder {
    options: Option<PluginOptions>,
    transformer: Option<Box<dyn CodeTransformer>>,
    compiler: Option<Box<dyn RuleCompiler>>,
    minifier: Option<Box<dyn CssMinifier>>,
}

impl StylexPluginBuilder {
    /// Creates a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the plugin options.
    pub fn options(mut self, options: PluginOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Sets the code transformer that extracts style rules.
    pub fn transformer<T: CodeTransformer + 'static>(mut self, transformer: T) -> Self {
        self.transformer = Some(Box::new(transformer));
        self
    }

    /// Replaces the built-in rule compiler.
    pub fn rule_compiler<C: RuleCompiler + 'static>(mut self, compiler: C) -> Self {
        self.compiler = Some(Box::new(compiler));
        self
    }

    /// Replaces the built-in CSS minifier.
    pub fn minifier<M: CssMinifier + 'static>(mut self, minifier: M) -> Self {
        self.minifier = Some(Box::new(minifier));
        self
    }

    /// Validates the options and builds the plugin.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Config`] for invalid options and
    /// [`PluginError::MissingCollaborator`] if no transformer was set.
    pub fn build(self) -> Result<StylexPlugin, PluginError> {
        let options = self.options.unwrap_or_default();
        options.validate()?;

        let transformer = self
            .transformer
            .ok_or(PluginError::MissingCollaborator("code transformer"))?;

        let target = if options.dev {
            EmissionTarget::Virtual(VirtualModule::new(
                &options.virtual_module_prefix,
                &options.file_name,
            ))
        } else {
            EmissionTarget::Asset {
                file_name: options.file_name.clone(),
            }
        };

        let compiler = self
            .compiler
            .unwrap_or_else(|| Box::new(AtomicRuleCompiler::new(options.layer_mode)));
        let minifier = self
            .minifier
            .unwrap_or_else(|| Box::new(CssparserMinifier));

        Ok(StylexPlugin {
            extractor: RuleExtractor::new(&options, transformer),
            options,
            target,
            compiler,
            minifier,
            host: HostConfig::default(),
            store: RuleStore::new(),
        })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::rules::StyleRule;
    use crate::transform::{TransformRequest, TransformerError};
    use proptest::prelude::*;

    fn line_transformer(req: &TransformRequest<'_>) -> Result<TransformResult, TransformerError> {
        let rules = req
            .source
            .lines()
            .filter_map(|line| line.strip_prefix("rule "))
            .map(|rest| {
                let (class, priority) = rest.split_once(' ').unwrap_or((rest, "3000"));
                StyleRule::new(
                    class,
                    format!(".{}{{color:red}}", class),
                    priority.parse().unwrap_or(3000.0),
                )
            })
            .collect();
        Ok(TransformResult {
            code: None,
            map: None,
            meta: TransformMeta::with_rules(rules),
        })
    }

    fn plugin() -> StylexPlugin {
        StylexPlugin::builder()
            .options(PluginOptions::new().dev(false))
            .transformer(line_transformer)
            .build()
            .unwrap()
    }

    fn arb_modules() -> impl Strategy<Value = Vec<String>> {
        let rule = ("[a-e]{1,2}", 1u32..5).prop_map(|(name, level)| format!("x{} {}", name, level * 1000));
        let module = prop::collection::vec(rule, 0..4).prop_map(|rules| {
            let mut source = String::from("import stylex from 'stylex';\n");
            for rule in rules {
                source.push_str(&format!("rule {}\n", rule));
            }
            source
        });
        prop::collection::vec(module, 1..8)
    }

    proptest! {
        #[test]
        fn cached_modules_compile_like_fresh_ones(
            modules in arb_modules(),
            cached_mask in prop::collection::vec(prop::bool::ANY, 8),
        ) {
            let mut fresh = plugin();
            fresh.build_start();
            let mut metas = Vec::new();
            for (i, source) in modules.iter().enumerate() {
                let result = fresh.transform(source, &format!("/src/m{}.tsx", i)).unwrap().unwrap();
                metas.push(result.meta);
            }
            let expected = fresh.generate_bundle().unwrap();

            let mut mixed = plugin();
            mixed.build_start();
            for (i, source) in modules.iter().enumerate() {
                let id = format!("/src/m{}.tsx", i);
                if cached_mask[i] {
                    prop_assert!(!mixed.should_transform_cached_module(&id, &metas[i]));
                } else {
                    mixed.transform(source, &id).unwrap();
                }
            }

            prop_assert_eq!(mixed.generate_bundle().unwrap(), expected);
        }

        #[test]
        fn reset_isolates_cycles(first in arb_modules(), second in arb_modules()) {
            let mut plugin = plugin();

            plugin.build_start();
            for (i, source) in first.iter().enumerate() {
                plugin.transform(source, &format!("/src/first{}.tsx", i)).unwrap();
            }

            plugin.build_start();
            for (i, source) in second.iter().enumerate() {
                plugin.transform(source, &format!("/src/second{}.tsx", i)).unwrap();
            }
            let after_reset = plugin.compile().unwrap();

            let mut only_second = self::plugin();
            only_second.build_start();
            for (i, source) in second.iter().enumerate() {
                only_second.transform(source, &format!("/src/second{}.tsx", i)).unwrap();
            }

            prop_assert!(plugin.store().iter().all(|(id, _)| id.contains("second")));
            prop_assert_eq!(after_reset, only_second.compile().unwrap());
        }
    }
}
