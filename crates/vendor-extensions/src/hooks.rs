//! Package hooks run around the lifecycle.
//!
//! A hook decides by package identity whether it applies and then runs
//! after the host has installed or removed the package files. Hooks never
//! see the manifest or the config targets.

use std::fmt;

use serde::{Deserialize, Serialize};
use vendor_fs::{NormalizedPath, StorageLayout, io};

use crate::error::Result;
use crate::package::PackageDescriptor;

/// What a hook gets to work with.
#[derive(Debug, Clone, Copy)]
pub struct HookContext<'a> {
    pub layout: &'a StorageLayout,
    pub package: &'a PackageDescriptor,
}

/// Side effect tied to a package identity.
pub trait PackageHook: fmt::Debug + Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    /// Whether the hook applies to `package`.
    fn matches(&self, package: &PackageDescriptor) -> bool;

    /// Runs after the host installed or updated the package.
    fn after_install(&self, ctx: &HookContext<'_>) -> Result<()>;

    /// Runs after the host removed the package.
    fn after_uninstall(&self, ctx: &HookContext<'_>) -> Result<()>;
}

/// Bridge files to write for one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Package that triggers the bridge (e.g., a development variant).
    pub package: String,
    /// Directory below the storage root receiving the bridge files.
    pub target: String,
    /// Directory inside the triggering package holding the real files.
    #[serde(default)]
    pub source_dir: String,
    /// File names to bridge.
    pub files: Vec<String>,
}

/// Writes small redirect files pointing into another installed package.
///
/// Each bridge file lands at `<root>/<target>/<file>` and names the real
/// file relative to its own directory.
#[derive(Debug, Clone)]
pub struct BridgeFilesHook {
    name: String,
    config: BridgeConfig,
}

impl BridgeFilesHook {
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            name: format!("bridge:{}", config.package),
            config,
        }
    }

    fn target_dir(&self, layout: &StorageLayout) -> NormalizedPath {
        layout.resolve(&self.config.target)
    }

    fn redirect(&self, layout: &StorageLayout, package: &PackageDescriptor, file: &str) -> String {
        let up = layout
            .relative_root_from(&self.target_dir(layout))
            .unwrap_or_else(|| layout.root().to_string());
        let source = NormalizedPath::new(package.install_name())
            .join(&self.config.source_dir)
            .join(file);
        format!(
            "# This is a link provided by the {} package via vendor-registry.\n\
             redirect = \"{}/{}\"\n",
            package.name, up, source
        )
    }
}

impl PackageHook for BridgeFilesHook {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, package: &PackageDescriptor) -> bool {
        package.name == self.config.package
    }

    fn after_install(&self, ctx: &HookContext<'_>) -> Result<()> {
        let dir = self.target_dir(ctx.layout);
        for file in &self.config.files {
            let path = dir.join(file);
            io::write_text(&path, &self.redirect(ctx.layout, ctx.package, file))?;
            tracing::debug!(path = %path, "Wrote bridge file");
        }
        tracing::info!(
            package = %ctx.package.name,
            bridge_dir = %self.config.target,
            count = self.config.files.len(),
            "Linked bridge files"
        );
        Ok(())
    }

    fn after_uninstall(&self, ctx: &HookContext<'_>) -> Result<()> {
        let dir = self.target_dir(ctx.layout);
        for file in &self.config.files {
            io::remove_file_if_exists(&dir.join(file))?;
        }
        io::remove_dir_if_empty(&dir)?;
        tracing::info!(
            package = %ctx.package.name,
            bridge_dir = %self.config.target,
            "Unlinked bridge files"
        );
        Ok(())
    }
}
