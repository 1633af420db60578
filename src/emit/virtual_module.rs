//! Virtual stylesheet module identities.
//!
//! Hosts distinguish the id an import requests (`virtual:stylex.css`) from
//! the internal id of a module with no backing file, which by convention
//! starts with a NUL character (`\0virtual:stylex.css`).

/// Prefix marking an internal virtual module id.
pub const VIRTUAL_MARKER: char = '\0';

/// The public and internal ids of the virtual stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualModule {
    public_id: String,
    internal_id: String,
}

impl VirtualModule {
    /// Builds the ids from the configured prefix and file name.
    pub fn new(prefix: &str, file_name: &str) -> Self {
        let public_id = format!("{}{}", prefix, file_name);
        let internal_id = format!("{}{}", VIRTUAL_MARKER, public_id);
        Self {
            public_id,
            internal_id,
        }
    }

    /// The id application code imports.
    pub fn public_id(&self) -> &str {
        &self.public_id
    }

    /// The id the host uses after resolution.
    pub fn internal_id(&self) -> &str {
        &self.internal_id
    }

    /// Maps the public id to the internal id.
    pub fn resolve(&self, id: &str) -> Option<&str> {
        (id == self.public_id).then_some(self.internal_id.as_str())
    }

    /// Returns true for either form of the id.
    pub fn matches(&self, id: &str) -> bool {
        id == self.internal_id || id == self.public_id
    }
}
