mod common;

use common::{host_with_css_pipeline, plugin, styled_module, MockTransformer};
use stylex_plugin::{
    inject_tags, HostConfig, LayerMode, PluginError, PluginOptions, StyleRule, StylexPlugin,
    TransformMeta, TransformerError,
};

#[test]
fn test_production_cycle_emits_one_asset_and_link() {
    let mut plugin = plugin(false, MockTransformer::new());
    plugin.config_resolved(HostConfig::new("/static/"));
    plugin.build_start();

    plugin.transform(&styled_module(&["xa 3000"]), "/src/A.tsx").unwrap();
    plugin.transform(&styled_module(&["xb 3000"]), "/src/B.tsx").unwrap();

    let asset = plugin.generate_bundle().unwrap().unwrap();
    assert_eq!(asset.file_name, "stylex.css");
    assert_eq!(asset.source.matches("{color:red}").count(), 2);
    assert!(asset.source.find(".xa").unwrap() < asset.source.find(".xb").unwrap());

    let html = "<html><head><title>app</title></head><body></body></html>";
    let result = plugin.transform_index_html(html).unwrap();
    assert_eq!(result.tags.len(), 1);
    assert_eq!(result.tags[0].attr("href"), Some("/static/stylex.css"));

    let document = inject_tags(&result.html, &result.tags).unwrap();
    assert!(document.contains(
        "<link href=\"/static/stylex.css\" rel=\"stylesheet\">\n</head>"
    ));
}

#[test]
fn test_module_without_import_passes_through() {
    let transformer = MockTransformer::new();
    let mut plugin = plugin(false, transformer.clone());
    plugin.build_start();

    let result = plugin
        .transform("export const rule = 'rule xc 3000';", "/src/C.ts")
        .unwrap();

    assert!(result.is_none());
    assert!(!plugin.store().contains("/src/C.ts"));
    assert_eq!(transformer.calls(), 0);
}

#[test]
fn test_reset_isolates_cycles() {
    let mut plugin = plugin(false, MockTransformer::new());

    plugin.build_start();
    plugin.transform(&styled_module(&["xa"]), "/src/A.tsx").unwrap();
    plugin.transform(&styled_module(&["xb"]), "/src/B.tsx").unwrap();

    plugin.build_start();
    plugin.transform(&styled_module(&["xb"]), "/src/B.tsx").unwrap();

    let asset = plugin.generate_bundle().unwrap().unwrap();
    assert!(!asset.source.contains(".xa"));
    assert!(asset.source.contains(".xb{color:red}"));
    assert_eq!(plugin.store().len(), 1);
}

#[test]
fn test_cached_modules_match_fresh_transforms() {
    let sources = [
        ("/src/A.tsx", styled_module(&["xa 3000", "xshared 4000"])),
        ("/src/B.tsx", styled_module(&["xb 2000 rtl", "xshared 4000"])),
        ("/src/C.tsx", styled_module(&[])),
    ];

    let mut fresh = plugin(false, MockTransformer::new());
    fresh.build_start();
    let metas: Vec<TransformMeta> = sources
        .iter()
        .map(|(id, source)| fresh.transform(source, id).unwrap().unwrap().meta)
        .collect();

    let transformer = MockTransformer::new();
    let mut cached = plugin(false, transformer.clone());
    cached.build_start();
    for ((id, _), meta) in sources.iter().zip(&metas) {
        assert!(!cached.should_transform_cached_module(id, meta));
    }

    assert_eq!(transformer.calls(), 0);
    assert_eq!(
        cached.generate_bundle().unwrap(),
        fresh.generate_bundle().unwrap()
    );
}

#[test]
fn test_cached_metadata_survives_serialization() {
    let mut fresh = plugin(false, MockTransformer::new());
    let meta = fresh
        .transform(&styled_module(&["xa 3000 rtl"]), "/src/A.tsx")
        .unwrap()
        .unwrap()
        .meta;

    let json = serde_json::to_string(&meta).unwrap();
    let restored: TransformMeta = serde_json::from_str(&json).unwrap();

    let mut cached = plugin(false, MockTransformer::new());
    cached.should_transform_cached_module("/src/A.tsx", &restored);
    assert_eq!(cached.compile().unwrap(), fresh.compile().unwrap());
}

#[test]
fn test_transform_failure_propagates() {
    let mut plugin = plugin(false, MockTransformer::new());
    plugin.build_start();
    plugin.transform(&styled_module(&["xa"]), "/src/A.tsx").unwrap();

    let source = format!("{}syntax error\n", styled_module(&["xbad"]));
    let err = plugin.transform(&source, "/src/Broken.tsx").unwrap_err();

    match &err {
        PluginError::Transform { id, source } => {
            assert_eq!(id, "/src/Broken.tsx");
            assert!(matches!(source, TransformerError::Syntax { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("/src/Broken.tsx"));
    assert!(!plugin.store().contains("/src/Broken.tsx"));
    assert!(plugin.store().contains("/src/A.tsx"));
}

#[test]
fn test_minifies_only_with_css_pipeline() {
    let mut raw = plugin(false, MockTransformer::new());
    raw.transform(&styled_module(&["xa"]), "/src/A.tsx").unwrap();
    let raw_css = raw.generate_bundle().unwrap().unwrap().source;
    assert!(raw_css.contains('\n'));

    let mut minified = plugin(false, MockTransformer::new());
    minified.config_resolved(host_with_css_pipeline("/"));
    minified.transform(&styled_module(&["xa"]), "/src/A.tsx").unwrap();
    let min_css = minified.generate_bundle().unwrap().unwrap().source;

    assert!(!min_css.contains('\n'));
    assert!(min_css.contains(".xa{color:red}"));
    assert!(min_css.len() < raw_css.len());
}

#[test]
fn test_empty_cycle_emits_nothing() {
    let mut plugin = plugin(false, MockTransformer::new());
    plugin.build_start();
    plugin.transform(&styled_module(&[]), "/src/Empty.tsx").unwrap();
    plugin.transform("export {}", "/src/plain.ts").unwrap();

    assert!(plugin.generate_bundle().unwrap().is_none());
    assert!(plugin.transform_index_html("<html></html>").is_none());
}

#[test]
fn test_duplicate_rules_across_modules_emitted_once() {
    let mut plugin = plugin(false, MockTransformer::new());
    plugin.transform(&styled_module(&["xa"]), "/src/A.tsx").unwrap();
    plugin.transform(&styled_module(&["xa"]), "/src/B.tsx").unwrap();

    let css = plugin.generate_bundle().unwrap().unwrap().source;
    assert_eq!(css.matches(".xa{color:red}").count(), 1);
}

#[test]
fn test_specificity_layer_mode() {
    let mut plugin = StylexPlugin::builder()
        .options(PluginOptions::new().dev(false).layer_mode(LayerMode::Specificity))
        .transformer(MockTransformer::new())
        .build()
        .unwrap();
    plugin.transform(&styled_module(&["xa 1000", "xb 2000"]), "/src/A.tsx").unwrap();

    let css = plugin.generate_bundle().unwrap().unwrap().source;
    assert!(!css.contains("@layer"));
    assert!(css.contains(":not(#\\#)"));
}

#[test]
fn test_custom_rule_compiler() {
    let names = |rules: &[StyleRule]| -> Result<String, stylex_plugin::CompileError> {
        Ok(rules
            .iter()
            .map(|r| r.class_name.clone())
            .collect::<Vec<_>>()
            .join(" "))
    };
    let mut plugin = StylexPlugin::builder()
        .options(PluginOptions::new().dev(false).file_name("assets/atoms.css"))
        .transformer(MockTransformer::new())
        .rule_compiler(names)
        .build()
        .unwrap();
    plugin.transform(&styled_module(&["xa", "xb"]), "/src/A.tsx").unwrap();

    let asset = plugin.generate_bundle().unwrap().unwrap();
    assert_eq!(asset.file_name, "assets/atoms.css");
    assert_eq!(asset.source, "xa xb");
}

#[test]
fn test_cached_priority_out_of_range_is_an_error() {
    let mut plugin = StylexPlugin::builder()
        .options(PluginOptions::new().dev(false).layer_mode(LayerMode::Specificity))
        .transformer(MockTransformer::new())
        .build()
        .unwrap();
    let meta: TransformMeta =
        serde_json::from_str(r#"{"stylex": [["x1", {"ltr": ".x1{color:red}"}, 1e300]]}"#).unwrap();
    plugin.should_transform_cached_module("/src/Cached.tsx", &meta);

    assert!(matches!(
        plugin.generate_bundle(),
        Err(PluginError::Compile(stylex_plugin::CompileError::InvalidPriority { .. }))
    ));
}
