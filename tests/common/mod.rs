//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use stylex_plugin::{
    CodeTransformer, HostConfig, PluginOptions, StyleRule, StylexPlugin, TransformMeta,
    TransformRequest, TransformResult, TransformerError, CSS_PLUGIN, CSS_POST_PLUGIN,
};

/// A stand-in for a real style transformer.
///
/// Each `rule <class> <priority> [rtl]` line in a module becomes one rule with
/// a `color:red` declaration. A line reading `syntax error` fails the
/// transform. Calls are counted so tests can check the import fast path.
#[derive(Clone, Default)]
pub struct MockTransformer {
    calls: Arc<AtomicUsize>,
}

impl MockTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CodeTransformer for MockTransformer {
    fn transform(&self, request: &TransformRequest<'_>) -> Result<TransformResult, TransformerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut rules = Vec::new();
        for line in request.source.lines().map(str::trim) {
            if line == "syntax error" {
                return Err(TransformerError::Syntax {
                    message: format!("Unexpected token in {}", request.file_name),
                });
            }
            let Some(rest) = line.strip_prefix("rule ") else {
                continue;
            };
            let parts: Vec<&str> = rest.split_whitespace().collect();
            let class = parts.first().copied().unwrap_or("x0");
            let priority = parts.get(1).and_then(|p| p.parse().ok()).unwrap_or(3000.0);
            let mut rule = StyleRule::new(class, format!(".{}{{color:red}}", class), priority);
            if parts.get(2) == Some(&"rtl") {
                rule = rule.with_rtl(format!(".{}{{color:blue}}", class));
            }
            rules.push(rule);
        }

        Ok(TransformResult {
            code: Some(format!("/* stylex */\n{}", request.source)),
            map: None,
            meta: TransformMeta::with_rules(rules),
        })
    }
}

/// Module source importing the style API and declaring the given rules.
pub fn styled_module(rules: &[&str]) -> String {
    let mut source = String::from("import * as stylex from '@stylexjs/stylex';\n");
    for rule in rules {
        source.push_str("rule ");
        source.push_str(rule);
        source.push('\n');
    }
    source
}

pub fn plugin(dev: bool, transformer: MockTransformer) -> StylexPlugin {
    StylexPlugin::builder()
        .options(PluginOptions::new().dev(dev))
        .transformer(transformer)
        .build()
        .unwrap()
}

/// A host that provides both CSS pipeline stages.
pub fn host_with_css_pipeline(base: &str) -> HostConfig {
    HostConfig::new(base).with_plugins(["vite:build-html", CSS_PLUGIN, CSS_POST_PLUGIN])
}
