//! Emission targets and emitted assets.

use serde::Serialize;

use super::virtual_module::VirtualModule;

/// Where the compiled stylesheet goes, fixed when the plugin is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmissionTarget {
    /// Development: served on demand as a virtual module.
    Virtual(VirtualModule),
    /// Production: emitted once per cycle as a static asset.
    Asset { file_name: String },
}

impl EmissionTarget {
    /// Returns true for the development target.
    pub fn is_virtual(&self) -> bool {
        matches!(self, EmissionTarget::Virtual(_))
    }
}

/// A stylesheet ready for the host to write into the bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmittedAsset {
    pub file_name: String,
    pub source: String,
}
