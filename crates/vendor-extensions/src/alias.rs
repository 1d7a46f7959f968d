//! Path alias derivation from autoload declarations.
//!
//! Each single-path autoload mapping becomes one alias (`@acme/widgets`)
//! bound to the mapped directory. Directories below the storage root are
//! stored as [`ROOT_PLACEHOLDER`] followed by the remaining suffix, so a
//! manifest stays valid when the whole tree is moved elsewhere.

use std::collections::BTreeMap;

use vendor_fs::{NormalizedPath, StorageLayout};

use crate::package::{AutoloadPaths, PackageDescriptor};

/// In-memory stand-in for the absolute storage root inside alias values.
pub const ROOT_PLACEHOLDER: &str = "<vendor-dir>";

/// Prefix marking a name as an alias.
pub const ALIAS_SIGIL: char = '@';

/// Autoload convention a mapping was declared under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Convention {
    /// Namespace tree lives below the mapped directory.
    Psr0,
    /// Mapped directory is the namespace root.
    Psr4,
}

/// Derives aliases for packages installed below one storage root.
#[derive(Debug, Clone, Copy)]
pub struct AliasResolver<'a> {
    layout: &'a StorageLayout,
}

impl<'a> AliasResolver<'a> {
    pub fn new(layout: &'a StorageLayout) -> Self {
        Self { layout }
    }

    /// Compute the alias map for `package`.
    pub fn resolve(&self, package: &PackageDescriptor) -> BTreeMap<String, String> {
        let mut aliases = BTreeMap::new();
        let mappings = package
            .autoload
            .psr0
            .iter()
            .map(|m| (Convention::Psr0, m))
            .chain(package.autoload.psr4.iter().map(|m| (Convention::Psr4, m)));

        for (convention, (prefix, paths)) in mappings {
            if let Some((alias, path)) = self.resolve_one(package, convention, prefix, paths) {
                aliases.insert(alias, path);
            }
        }
        aliases
    }

    fn resolve_one(
        &self,
        package: &PackageDescriptor,
        convention: Convention,
        prefix: &str,
        paths: &AutoloadPaths,
    ) -> Option<(String, String)> {
        let Some(path) = paths.single() else {
            tracing::info!(
                package = %package.name,
                prefix,
                "Skipping alias for autoload mapping with multiple search paths"
            );
            return None;
        };
        let namespace = namespace_path(prefix)?;

        let declared = NormalizedPath::new(path);
        let resolved = if declared.is_absolute() {
            declared
        } else {
            self.layout.package_dir(package.install_name()).join(path)
        };

        let mut value = portable_path(&resolved, self.layout.root());
        if convention == Convention::Psr0 {
            value.push('/');
            value.push_str(&namespace);
        }
        Some((format!("{ALIAS_SIGIL}{namespace}"), value))
    }
}

/// Turn a namespace prefix into a slash-separated path.
///
/// Returns `None` for the empty (catch-all) prefix.
pub fn namespace_path(prefix: &str) -> Option<String> {
    let name = prefix.replace('\\', "/");
    let name = name.trim_matches('/');
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Rewrite `path` relative to `root` when it lies below it.
pub fn portable_path(path: &NormalizedPath, root: &NormalizedPath) -> String {
    match path.strip_root(root) {
        Some(suffix) => format!("{ROOT_PLACEHOLDER}{suffix}"),
        None => path.as_str().to_string(),
    }
}

/// Expand [`ROOT_PLACEHOLDER`] in an alias value against `root`.
pub fn expand_placeholder(value: &str, root: &NormalizedPath) -> String {
    match value.strip_prefix(ROOT_PLACEHOLDER) {
        Some(suffix) => format!("{}{}", root.as_str().trim_end_matches('/'), suffix),
        None => value.to_string(),
    }
}
