//! Package descriptors handed over by the host package manager.
//!
//! A descriptor is the read-only view of an installed package: identity,
//! version, autoload path mappings and the free-form `extra` block.
//!
//! # Example JSON
//!
//! ```json
//! {
//!   "name": "acme/widgets",
//!   "version": "1.4.0.0",
//!   "type": "vendor-extension",
//!   "autoload": {
//!     "psr-4": { "Acme\\Widgets\\": "src/" }
//!   },
//!   "extra": {
//!     "bootstrap": "Acme\\Widgets\\Bootstrap",
//!     "config": {
//!       "web": { "components": { "widgets": { "class": "Acme\\Widgets\\Manager" } } }
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use vendor_fs::NormalizedPath;

use crate::error::{Error, Result};

fn default_package_type() -> String {
    "library".to_string()
}

/// A package as described by the host package manager.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PackageDescriptor {
    /// Lower-case `vendor/package` identity.
    pub name: String,
    /// Normalized version string.
    pub version: String,
    /// Case-preserving name; also the install directory below the storage root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pretty_name: Option<String>,
    /// Package type (e.g., "vendor-extension").
    #[serde(rename = "type", default = "default_package_type")]
    pub package_type: String,
    /// Declared autoload path mappings.
    #[serde(default)]
    pub autoload: Autoload,
    /// Free-form metadata block.
    #[serde(default)]
    pub extra: Map<String, Value>,
}

/// Autoload declarations, keyed by namespace prefix.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Autoload {
    #[serde(rename = "psr-0", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub psr0: BTreeMap<String, AutoloadPaths>,
    #[serde(rename = "psr-4", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub psr4: BTreeMap<String, AutoloadPaths>,
}

/// One or several search paths mapped to a namespace prefix.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AutoloadPaths {
    Single(String),
    Multiple(Vec<String>),
}

impl AutoloadPaths {
    /// The path when exactly one is declared.
    ///
    /// A one-element list counts as multiple: the declaration form is what
    /// makes a mapping ambiguous, not its length.
    pub fn single(&self) -> Option<&str> {
        match self {
            Self::Single(path) => Some(path),
            Self::Multiple(_) => None,
        }
    }
}

impl PackageDescriptor {
    /// Parse a descriptor from a JSON string.
    pub fn from_json(content: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Read and parse a descriptor file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = vendor_fs::io::read_text(&NormalizedPath::new(path))?;
        let descriptor = Self::from_json(&content).map_err(|e| Error::DescriptorParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Check that the name can be used as a path below the storage root.
    pub fn validate(&self) -> Result<()> {
        for name in std::iter::once(&self.name).chain(self.pretty_name.as_ref()) {
            let reason = if name.is_empty() {
                Some("package name must not be empty")
            } else if name.starts_with('/') || name.contains('\\') {
                Some("package name must be a relative vendor/package path")
            } else if name.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..") {
                Some("package name must not contain empty, '.' or '..' segments")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(Error::InvalidName {
                    name: name.clone(),
                    reason: reason.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Directory name below the storage root.
    pub fn install_name(&self) -> &str {
        self.pretty_name.as_deref().unwrap_or(&self.name)
    }

    /// Bootstrap entries declared under `key`.
    ///
    /// Accepts a single string or a list of strings; anything else is
    /// ignored with a warning.
    pub fn bootstrap(&self, key: &str) -> Option<Vec<String>> {
        match self.extra.get(key)? {
            Value::String(entry) => Some(vec![entry.clone()]),
            Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s.clone()),
                        other => {
                            tracing::warn!(
                                package = %self.name,
                                "Ignoring non-string bootstrap entry {}",
                                other
                            );
                            None
                        }
                    })
                    .collect(),
            ),
            other => {
                tracing::warn!(
                    package = %self.name,
                    "Ignoring bootstrap declaration of unexpected shape: {}",
                    other
                );
                None
            }
        }
    }

    /// Config fragments declared under `key`, as target name and tree.
    ///
    /// Empty when the package declares no fragments. Target names are used
    /// verbatim as file names, so they may not contain path separators, and
    /// every fragment must be a mapping.
    pub fn config_fragments(&self, key: &str) -> Result<Vec<(&str, &Map<String, Value>)>> {
        let fragments = match self.extra.get(key) {
            None => return Ok(Vec::new()),
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(Error::InvalidFragment {
                    package: self.name.clone(),
                    target: key.to_string(),
                    reason: "config fragments must be a mapping of target name to tree"
                        .to_string(),
                });
            }
        };

        fragments
            .iter()
            .map(|(target, fragment)| {
                if target.is_empty()
                    || target.contains('/')
                    || target.contains('\\')
                    || target.starts_with('.')
                {
                    return Err(Error::InvalidFragment {
                        package: self.name.clone(),
                        target: target.clone(),
                        reason: "target name must be a plain file name".to_string(),
                    });
                }
                match fragment {
                    Value::Object(tree) => Ok((target.as_str(), tree)),
                    _ => Err(Error::InvalidFragment {
                        package: self.name.clone(),
                        target: target.clone(),
                        reason: "fragment must be a mapping".to_string(),
                    }),
                }
            })
            .collect()
    }
}
