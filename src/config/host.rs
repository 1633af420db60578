//! Host build configuration captured when the host resolves its config.

/// Name of the host's CSS transform stage.
pub const CSS_PLUGIN: &str = "vite:css";

/// Name of the host's CSS post-processing stage.
pub const CSS_POST_PLUGIN: &str = "vite:css-post";

/// The parts of the host's resolved configuration the plugin depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Public base path assets are served from.
    pub base: String,
    /// Names of the plugins registered with the host.
    pub plugins: Vec<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            base: "/".to_string(),
            plugins: Vec::new(),
        }
    }
}

impl HostConfig {
    /// Creates a host config with the given base path and no known plugins.
    ///
    /// An empty base falls back to `/`.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: if base.is_empty() { "/".to_string() } else { base },
            plugins: Vec::new(),
        }
    }

    /// Records the host's plugin names.
    pub fn with_plugins<I, S>(mut self, plugins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.plugins = plugins.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if both CSS pipeline stages are present.
    pub fn css_pipeline_available(&self) -> bool {
        self.has_plugin(CSS_PLUGIN) && self.has_plugin(CSS_POST_PLUGIN)
    }

    fn has_plugin(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p == name)
    }
}
