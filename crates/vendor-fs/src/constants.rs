//! Default locations of generated artifacts, relative to the storage root.

use std::path::Path;

/// Standard registry filesystem paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryPath {
    /// The generated extension manifest
    Manifest,
    /// Directory holding the generated config targets
    ConfigDir,
    /// Optional settings file read at startup
    Settings,
}

impl RegistryPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manifest => "registry/extensions.toml",
            Self::ConfigDir => "registry/config",
            Self::Settings => "vendor-registry.toml",
        }
    }
}

impl AsRef<Path> for RegistryPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for RegistryPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for RegistryPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
