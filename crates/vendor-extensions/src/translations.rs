//! Translation source discovery and registration.
//!
//! A package ships message files as `<messages>/<locale>/<category>.<ext>`.
//! Every distinct category becomes one entry below `i18n.translations` in
//! the translations config target:
//!
//! ```toml
//! [i18n.translations.app]
//! class = "yii\\i18n\\PhpMessageSource"
//! basePath = "@vendor/acme/widgets/messages"
//! ```

use std::collections::BTreeSet;

use serde_json::{Map, Value, json};
use vendor_fs::{NormalizedPath, StorageLayout};
use walkdir::WalkDir;

use crate::config_file::ConfigFileStore;
use crate::error::Result;
use crate::package::PackageDescriptor;
use crate::settings::TranslationSettings;

const I18N_KEY: &str = "i18n";
const TRANSLATIONS_KEY: &str = "translations";

/// Registers package translation categories in one shared config target.
#[derive(Debug, Clone)]
pub struct TranslationRegistrar {
    settings: TranslationSettings,
    target: NormalizedPath,
    layout: StorageLayout,
    files: ConfigFileStore,
}

impl TranslationRegistrar {
    pub fn new(
        settings: TranslationSettings,
        target: NormalizedPath,
        layout: StorageLayout,
        files: ConfigFileStore,
    ) -> Self {
        Self {
            settings,
            target,
            layout,
            files,
        }
    }

    /// The config file translation sources are written to.
    pub fn target(&self) -> &NormalizedPath {
        &self.target
    }

    /// Message categories shipped by `package`.
    ///
    /// Returns `None` when the package has no message directory, and an
    /// empty list when it has one without any message files. Locale
    /// directories are not distinguished.
    pub fn discover(&self, package: &PackageDescriptor) -> Result<Option<Vec<String>>> {
        let dir = self
            .layout
            .package_dir(package.install_name())
            .join(&self.settings.messages_dir);
        if !dir.is_dir() {
            return Ok(None);
        }

        let mut categories = BTreeSet::new();
        for entry in WalkDir::new(dir.to_native()) {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(|p| p.to_path_buf())
                    .unwrap_or_else(|| dir.to_native());
                vendor_fs::Error::io(path, e.into())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = NormalizedPath::new(entry.path());
            if path.extension() != Some(self.settings.message_extension.as_str()) {
                continue;
            }
            if let Some(stem) = path.file_stem() {
                categories.insert(stem.to_string());
            }
        }

        tracing::debug!(
            package = %package.name,
            count = categories.len(),
            "Discovered translation categories"
        );
        Ok(Some(categories.into_iter().collect()))
    }

    /// The fragment registering `categories` for `package`.
    pub fn fragment(&self, package: &PackageDescriptor, categories: &[String]) -> Map<String, Value> {
        let base_path = format!(
            "@vendor/{}/{}",
            package.name, self.settings.messages_dir
        );
        let sources: Map<String, Value> = categories
            .iter()
            .map(|category| {
                (
                    category.clone(),
                    json!({"class": self.settings.source_class, "basePath": base_path}),
                )
            })
            .collect();

        let mut i18n = Map::new();
        i18n.insert(TRANSLATIONS_KEY.to_string(), Value::Object(sources));
        let mut fragment = Map::new();
        fragment.insert(I18N_KEY.to_string(), Value::Object(i18n));
        fragment
    }

    /// Merge translation sources for `categories` into the target.
    ///
    /// A missing target is reported and then created.
    pub fn register(&self, package: &PackageDescriptor, categories: &[String]) -> Result<()> {
        if categories.is_empty() {
            return Ok(());
        }
        if !self.target.exists() {
            tracing::warn!(
                target_file = %self.target,
                "Translations target not found, creating it"
            );
        }
        tracing::info!(package = %package.name, ?categories, "Registering translations");
        self.files
            .merge_in(&self.target, &self.fragment(package, categories))
    }

    /// Remove the entries for `categories` from the target.
    ///
    /// Only the named category keys are removed, whatever their values.
    /// A missing target is reported and left absent.
    pub fn unregister(&self, package: &PackageDescriptor, categories: &[String]) -> Result<()> {
        if categories.is_empty() {
            return Ok(());
        }
        if !self.target.exists() {
            tracing::warn!(
                target_file = %self.target,
                "Translations target not found, nothing to unregister"
            );
            return Ok(());
        }

        let mut tree = self.files.load(&self.target)?;
        if let Some(Value::Object(sources)) = tree
            .get_mut(I18N_KEY)
            .and_then(|i18n| i18n.get_mut(TRANSLATIONS_KEY))
        {
            for category in categories {
                sources.remove(category);
            }
        }
        tracing::info!(package = %package.name, ?categories, "Unregistering translations");
        self.files.save(&self.target, &tree)
    }
}
