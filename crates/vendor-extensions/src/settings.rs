//! Registry settings from `vendor-registry.toml`.
//!
//! Every field has a default, so the settings file is optional and may set
//! only the keys it cares about.
//!
//! # Example TOML
//!
//! ```toml
//! manifest_path = "registry/extensions.toml"
//! config_dir = "registry/config"
//! package_type = "vendor-extension"
//!
//! [translations]
//! target = "components"
//! message_extension = "php"
//!
//! [[bridges]]
//! package = "acme/framework-dev"
//! target = "acme/framework"
//! source_dir = "framework"
//! files = ["Core.php", "BaseCore.php", "classes.php"]
//! ```

use serde::{Deserialize, Serialize};
use vendor_fs::{ConfigStore, NormalizedPath, RegistryPath, StorageLayout};

use crate::error::{Error, Result};
use crate::hooks::BridgeConfig;

/// Settings controlling where artifacts live and how metadata is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrySettings {
    /// Manifest location relative to the storage root.
    pub manifest_path: String,
    /// Directory of generated config targets relative to the storage root.
    pub config_dir: String,
    /// Extension (and thereby format) of generated config targets.
    pub config_extension: String,
    /// Only packages of this type are handled.
    pub package_type: String,
    /// `extra` key holding bootstrap entries.
    pub bootstrap_key: String,
    /// `extra` key holding config fragments by target name.
    pub fragment_key: String,
    /// Config targets created empty on activation.
    pub ensure_targets: Vec<String>,
    pub translations: TranslationSettings,
    /// Bridge files written for development variants of base packages.
    pub bridges: Vec<BridgeConfig>,
}

/// Where translation sources are registered and how they are discovered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationSettings {
    /// Config target receiving `i18n.translations` entries.
    pub target: String,
    /// Message directory name inside a package.
    pub messages_dir: String,
    /// Extension of per-category message files.
    pub message_extension: String,
    /// Loader class written into each translation source.
    pub source_class: String,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            target: "components".to_string(),
            messages_dir: "messages".to_string(),
            message_extension: "php".to_string(),
            source_class: "yii\\i18n\\PhpMessageSource".to_string(),
        }
    }
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            manifest_path: RegistryPath::Manifest.as_str().to_string(),
            config_dir: RegistryPath::ConfigDir.as_str().to_string(),
            config_extension: "toml".to_string(),
            package_type: "vendor-extension".to_string(),
            bootstrap_key: "bootstrap".to_string(),
            fragment_key: "config".to_string(),
            ensure_targets: [
                "console",
                "components",
                "web",
                "modules",
                "modules.dev",
                "bootstrap",
                "bootstrap.dev",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            translations: TranslationSettings::default(),
            bridges: Vec::new(),
        }
    }
}

impl RegistrySettings {
    /// Load settings for a storage root.
    ///
    /// An explicit path must exist. Without one, `vendor-registry.toml` at
    /// the storage root is used when present and defaults otherwise.
    pub fn load(layout: &StorageLayout, explicit: Option<&NormalizedPath>) -> Result<Self> {
        let store = ConfigStore::new();
        let settings: Self = match explicit {
            Some(path) => store.load(path)?,
            None => {
                let path = layout.resolve(RegistryPath::Settings.as_str());
                store.load_or_default(&path)?
            }
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings that would place artifacts outside the storage root.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("manifest_path", &self.manifest_path),
            ("config_dir", &self.config_dir),
        ] {
            let path = std::path::Path::new(value);
            if value.is_empty()
                || path.has_root()
                || path
                    .components()
                    .any(|c| c == std::path::Component::ParentDir)
            {
                return Err(Error::InvalidSettings {
                    reason: format!(
                        "{field} must be a relative path below the storage root, got {value:?}"
                    ),
                });
            }
        }
        for target in self
            .ensure_targets
            .iter()
            .chain(std::iter::once(&self.translations.target))
        {
            if target.is_empty() || target.contains('/') || target.contains('\\') {
                return Err(Error::InvalidSettings {
                    reason: format!("config target {target:?} must be a plain file name"),
                });
            }
        }
        Ok(())
    }

    /// File backing a config target.
    pub fn config_path(&self, layout: &StorageLayout, target: &str) -> NormalizedPath {
        layout
            .resolve(&self.config_dir)
            .join(&format!("{target}.{}", self.config_extension))
    }

    /// File backing the manifest.
    pub fn manifest_path(&self, layout: &StorageLayout) -> NormalizedPath {
        layout.resolve(&self.manifest_path)
    }
}
