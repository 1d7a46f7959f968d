//! The generated extension manifest.
//!
//! The manifest maps package names to [`ExtensionRecord`]s. On disk it
//! declares where the storage root is relative to the manifest's own
//! directory, and alias values below that root refer to it through the
//! `${root}` token, so the generated file stays valid after the whole tree
//! is relocated.
//!
//! # Example TOML
//!
//! ```toml
//! # Auto generated by vendor-registry. Do not edit.
//!
//! root = ".."
//!
//! [extensions."acme/widgets"]
//! name = "acme/widgets"
//! version = "1.4.0.0"
//! bootstrap = ["Acme\\Widgets\\Bootstrap"]
//!
//! [extensions."acme/widgets".alias]
//! "@Acme/Widgets" = "${root}/acme/widgets/src"
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use vendor_fs::cache::invalidate_quietly;
use vendor_fs::{CacheInvalidator, ConfigStore, NormalizedPath, StorageLayout};

use crate::alias::{AliasResolver, ROOT_PLACEHOLDER, expand_placeholder, portable_path};
use crate::error::Result;
use crate::package::PackageDescriptor;

/// Header written at the top of every generated file.
pub const GENERATED_HEADER: &str = "Auto generated by vendor-registry. Do not edit.";

/// Token standing for the storage root inside the manifest file.
pub const ROOT_TOKEN: &str = "${root}";

/// Normalized description of one installed package.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExtensionRecord {
    /// Package name, unique within the manifest.
    pub name: String,
    /// Installed version.
    pub version: String,
    /// Bootstrap entries run by the host application.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bootstrap: Option<Vec<String>>,
    /// Alias name to path; paths below the storage root use the
    /// `<vendor-dir>` placeholder.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub alias: BTreeMap<String, String>,
}

impl ExtensionRecord {
    /// Derive the record for a materialized package.
    pub fn from_package(
        package: &PackageDescriptor,
        layout: &StorageLayout,
        bootstrap_key: &str,
    ) -> Self {
        Self {
            name: package.name.clone(),
            version: package.version.clone(),
            bootstrap: package.bootstrap(bootstrap_key),
            alias: AliasResolver::new(layout).resolve(package),
        }
    }

    /// Aliases with the placeholder expanded against `root`.
    pub fn resolved_aliases(&self, root: &NormalizedPath) -> BTreeMap<String, String> {
        self.alias
            .iter()
            .map(|(name, path)| (name.clone(), expand_placeholder(path, root)))
            .collect()
    }
}

/// All known extension records, keyed by package name.
///
/// Records are kept sorted by name so the generated file is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    extensions: BTreeMap<String, ExtensionRecord>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any record with the same name.
    pub fn add_or_replace(&mut self, record: ExtensionRecord) -> Option<ExtensionRecord> {
        self.extensions.insert(record.name.clone(), record)
    }

    /// Remove the record for `name`.
    pub fn remove(&mut self, name: &str) -> Option<ExtensionRecord> {
        self.extensions.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&ExtensionRecord> {
        self.extensions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.extensions.contains_key(name)
    }

    /// Records in name order.
    pub fn records(&self) -> impl Iterator<Item = &ExtensionRecord> {
        self.extensions.values()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

/// On-disk shape of the manifest.
#[derive(Debug, Default, Deserialize, Serialize)]
struct ManifestDocument {
    /// Storage root relative to the manifest's directory.
    #[serde(default)]
    root: String,
    #[serde(default)]
    extensions: BTreeMap<String, ExtensionRecord>,
}

/// Loads and saves the manifest file.
///
/// Holds no manifest state of its own; every call goes back to disk.
#[derive(Debug, Clone)]
pub struct ManifestStore {
    path: NormalizedPath,
    layout: StorageLayout,
    invalidator: Arc<dyn CacheInvalidator>,
}

impl ManifestStore {
    pub fn new(
        path: NormalizedPath,
        layout: StorageLayout,
        invalidator: Arc<dyn CacheInvalidator>,
    ) -> Self {
        Self {
            path,
            layout,
            invalidator,
        }
    }

    /// Location of the manifest file.
    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    /// Load the manifest; an absent file is an empty manifest.
    pub fn load(&self) -> Result<Manifest> {
        invalidate_quietly(self.invalidator.as_ref(), &self.path);
        if !self.path.exists() {
            tracing::debug!(path = %self.path, "No manifest yet, starting empty");
            return Ok(Manifest::new());
        }

        let document: ManifestDocument = ConfigStore::new().load(&self.path)?;
        let file_root = self.declared_root(&document.root);

        let extensions = document
            .extensions
            .into_iter()
            .map(|(name, mut record)| {
                for value in record.alias.values_mut() {
                    *value = self.import_alias(value, &file_root);
                }
                (name, record)
            })
            .collect();
        Ok(Manifest { extensions })
    }

    /// Rewrite the manifest file in full.
    pub fn save(&self, manifest: &Manifest) -> Result<()> {
        let root = self.root_expression();
        let extensions = manifest
            .extensions
            .iter()
            .map(|(name, record)| {
                let mut record = record.clone();
                for value in record.alias.values_mut() {
                    *value = self.export_alias(value);
                }
                (name.clone(), record)
            })
            .collect();

        ConfigStore::with_header(GENERATED_HEADER)
            .save(&self.path, &ManifestDocument { root, extensions })?;
        invalidate_quietly(self.invalidator.as_ref(), &self.path);
        tracing::debug!(path = %self.path, records = manifest.len(), "Saved manifest");
        Ok(())
    }

    /// Add or replace `record` in the stored manifest.
    pub fn add_or_replace(&self, record: ExtensionRecord) -> Result<()> {
        let mut manifest = self.load()?;
        tracing::info!(package = %record.name, version = %record.version, "Recording extension");
        manifest.add_or_replace(record);
        self.save(&manifest)
    }

    /// Remove the record for `name` from the stored manifest.
    ///
    /// Removing an unknown name still rewrites the file.
    pub fn remove(&self, name: &str) -> Result<Option<ExtensionRecord>> {
        let mut manifest = self.load()?;
        let removed = manifest.remove(name);
        if removed.is_none() {
            tracing::debug!(package = name, "Extension not in manifest");
        }
        self.save(&manifest)?;
        Ok(removed)
    }

    /// Write an empty manifest when none exists. Returns whether one was created.
    pub fn ensure(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        self.save(&Manifest::new())?;
        Ok(true)
    }

    fn manifest_dir(&self) -> NormalizedPath {
        self.path
            .parent()
            .unwrap_or_else(|| self.layout.root().clone())
    }

    /// How the storage root is reached from the manifest's directory.
    fn root_expression(&self) -> String {
        self.layout
            .relative_root_from(&self.manifest_dir())
            .unwrap_or_else(|| self.layout.root().to_string())
    }

    fn declared_root(&self, expression: &str) -> NormalizedPath {
        let declared = NormalizedPath::new(expression);
        if declared.is_absolute() {
            declared
        } else {
            self.manifest_dir().join(expression)
        }
    }

    fn import_alias(&self, value: &str, file_root: &NormalizedPath) -> String {
        let path = match value.strip_prefix(ROOT_TOKEN) {
            Some(suffix) => file_root.join(suffix.trim_start_matches('/')),
            None => NormalizedPath::new(value),
        };
        portable_path(&path, self.layout.root())
    }

    fn export_alias(&self, value: &str) -> String {
        if let Some(suffix) = value.strip_prefix(ROOT_PLACEHOLDER) {
            return format!("{ROOT_TOKEN}{suffix}");
        }
        match NormalizedPath::new(value).strip_root(self.layout.root()) {
            Some(suffix) => format!("{ROOT_TOKEN}{suffix}"),
            None => value.to_string(),
        }
    }
}
