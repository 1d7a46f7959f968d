//! The registry: every store bound to one storage root.
//!
//! [`Registry`] is a plain bundle of the manifest store, the config file
//! store and the translation registrar, configured from one
//! [`RegistrySettings`]. It exposes the per-package steps the lifecycle is
//! built from; sequencing them around the host is up to
//! [`Installer`](crate::installer::Installer).

use std::path::Path;
use std::sync::Arc;

use vendor_fs::{CacheInvalidator, NoopInvalidator, NormalizedPath, StorageLayout};

use crate::config_file::ConfigFileStore;
use crate::error::{Error, Result};
use crate::hooks::{BridgeFilesHook, PackageHook};
use crate::manifest::{ExtensionRecord, ManifestStore};
use crate::package::PackageDescriptor;
use crate::settings::RegistrySettings;
use crate::translations::TranslationRegistrar;

/// Stores and settings for one storage root.
#[derive(Debug, Clone)]
pub struct Registry {
    layout: StorageLayout,
    settings: RegistrySettings,
    manifest: ManifestStore,
    files: ConfigFileStore,
    translations: TranslationRegistrar,
}

impl Registry {
    /// Registry for hosts without an execution cache.
    pub fn new(layout: StorageLayout, settings: RegistrySettings) -> Self {
        Self::with_invalidator(layout, settings, Arc::new(NoopInvalidator))
    }

    pub fn with_invalidator(
        layout: StorageLayout,
        settings: RegistrySettings,
        invalidator: Arc<dyn CacheInvalidator>,
    ) -> Self {
        let manifest = ManifestStore::new(
            settings.manifest_path(&layout),
            layout.clone(),
            invalidator.clone(),
        );
        let files = ConfigFileStore::new(invalidator);
        let translations = TranslationRegistrar::new(
            settings.translations.clone(),
            settings.config_path(&layout, &settings.translations.target),
            layout.clone(),
            files.clone(),
        );
        Self {
            layout,
            settings,
            manifest,
            files,
            translations,
        }
    }

    /// Open the registry at `root`, loading settings from `settings_path`
    /// or from the default location below the root.
    pub fn open(root: impl AsRef<Path>, settings_path: Option<&NormalizedPath>) -> Result<Self> {
        let layout = StorageLayout::new(root)?;
        let settings = RegistrySettings::load(&layout, settings_path)?;
        Ok(Self::new(layout, settings))
    }

    pub fn layout(&self) -> &StorageLayout {
        &self.layout
    }

    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    pub fn manifest(&self) -> &ManifestStore {
        &self.manifest
    }

    pub fn config_files(&self) -> &ConfigFileStore {
        &self.files
    }

    pub fn translations(&self) -> &TranslationRegistrar {
        &self.translations
    }

    /// File backing config target `target`.
    pub fn config_path(&self, target: &str) -> NormalizedPath {
        self.settings.config_path(&self.layout, target)
    }

    /// Hooks declared in the settings.
    pub fn hooks(&self) -> Vec<Box<dyn PackageHook>> {
        self.settings
            .bridges
            .iter()
            .cloned()
            .map(|config| Box::new(BridgeFilesHook::new(config)) as Box<dyn PackageHook>)
            .collect()
    }

    /// Create the manifest and every expected config target that is missing.
    ///
    /// Existing files are left untouched. Returns the files created.
    pub fn activate(&self) -> Result<Vec<NormalizedPath>> {
        let mut created = Vec::new();
        if self.manifest.ensure()? {
            created.push(self.manifest.path().clone());
        }
        for target in &self.settings.ensure_targets {
            let path = self.config_path(target);
            if self.files.ensure(&path)? {
                created.push(path);
            }
        }
        tracing::info!(created = created.len(), "Activated registry");
        Ok(created)
    }

    /// Derive and store the record for `package`.
    pub fn add_package(&self, package: &PackageDescriptor) -> Result<ExtensionRecord> {
        let record =
            ExtensionRecord::from_package(package, &self.layout, &self.settings.bootstrap_key);
        self.manifest.add_or_replace(record.clone())?;
        Ok(record)
    }

    /// Drop the record for `package`.
    pub fn remove_package(&self, package: &PackageDescriptor) -> Result<Option<ExtensionRecord>> {
        tracing::info!(package = %package.name, "Removing extension record");
        self.manifest.remove(&package.name)
    }

    /// Merge the package's config fragments into their targets.
    ///
    /// Only targets that already exist are touched. Returns the targets
    /// merged into.
    pub fn add_config(&self, package: &PackageDescriptor) -> Result<Vec<String>> {
        self.apply_config(package, |path, fragment| self.files.merge_in(path, fragment))
    }

    /// Remove the package's config fragments from their targets.
    pub fn remove_config(&self, package: &PackageDescriptor) -> Result<Vec<String>> {
        self.apply_config(package, |path, fragment| self.files.merge_out(path, fragment))
    }

    /// Check that the package's fragments are well formed and can be
    /// written in the format of their targets.
    pub fn check_config(&self, package: &PackageDescriptor) -> Result<()> {
        for (target, fragment) in package.config_fragments(&self.settings.fragment_key)? {
            let path = self.config_path(target);
            self.files
                .check_writable(&path, fragment)
                .map_err(|e| Error::InvalidFragment {
                    package: package.name.clone(),
                    target: target.to_string(),
                    reason: e.to_string(),
                })?;
        }
        Ok(())
    }

    fn apply_config<F>(&self, package: &PackageDescriptor, apply: F) -> Result<Vec<String>>
    where
        F: Fn(&NormalizedPath, &serde_json::Map<String, serde_json::Value>) -> Result<()>,
    {
        let mut applied = Vec::new();
        for (target, fragment) in package.config_fragments(&self.settings.fragment_key)? {
            let path = self.config_path(target);
            if !path.exists() {
                tracing::debug!(
                    package = %package.name,
                    config_target = %target,
                    "Config target does not exist, skipping"
                );
                continue;
            }
            apply(&path, fragment)?;
            applied.push(target.to_string());
        }
        Ok(applied)
    }

    /// Register the package's translation categories.
    ///
    /// Returns the categories registered; empty when the package ships no
    /// messages.
    pub fn add_translations(&self, package: &PackageDescriptor) -> Result<Vec<String>> {
        let Some(categories) = self.translations.discover(package)? else {
            tracing::debug!(package = %package.name, "No message directory");
            return Ok(Vec::new());
        };
        self.translations.register(package, &categories)?;
        Ok(categories)
    }

    /// Unregister the package's translation categories.
    pub fn remove_translations(&self, package: &PackageDescriptor) -> Result<Vec<String>> {
        let Some(categories) = self.translations.discover(package)? else {
            return Ok(Vec::new());
        };
        self.translations.unregister(package, &categories)?;
        Ok(categories)
    }
}
