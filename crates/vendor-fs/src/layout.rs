//! Storage root layout
//!
//! Every installed package and every generated artifact lives below a
//! single storage root. The layout resolves root-relative locations and
//! computes how a generated file finds the root again from its own
//! directory.

use std::path::Path;

use crate::{Error, NormalizedPath, Result};

/// The directory under which all installed packages live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    root: NormalizedPath,
}

impl StorageLayout {
    /// Create a layout for an absolute storage root.
    ///
    /// The root is canonicalized when it exists so that symlinked spellings
    /// of the same directory compare equal.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_absolute() {
            return Err(Error::RelativeStorageRoot {
                path: root.to_path_buf(),
            });
        }
        let resolved = dunce::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
        Ok(Self {
            root: NormalizedPath::new(resolved),
        })
    }

    /// The normalized storage root.
    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// Resolve a root-relative location.
    pub fn resolve(&self, relative: &str) -> NormalizedPath {
        self.root.join(relative)
    }

    /// Install directory of a package, `<root>/<vendor>/<package>`.
    pub fn package_dir(&self, package: &str) -> NormalizedPath {
        self.root.join(package)
    }

    /// Relative path leading from `dir` back up to the storage root.
    ///
    /// Returns `None` when `dir` is not below the root.
    pub fn relative_root_from(&self, dir: &NormalizedPath) -> Option<String> {
        let suffix = dir.strip_root(&self.root)?;
        let depth = suffix.split('/').filter(|s| !s.is_empty()).count();
        if depth == 0 {
            Some(".".to_string())
        } else {
            Some(vec![".."; depth].join("/"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_root_counts_depth() {
        let layout = StorageLayout {
            root: NormalizedPath::new("/srv/vendor"),
        };
        let dir = NormalizedPath::new("/srv/vendor/registry/config");
        assert_eq!(layout.relative_root_from(&dir).as_deref(), Some("../.."));
        assert_eq!(
            layout.relative_root_from(layout.root()).as_deref(),
            Some(".")
        );
        assert_eq!(
            layout.relative_root_from(&NormalizedPath::new("/srv/other")),
            None
        );
    }
}
