//! Lifecycle orchestration around the host package manager.
//!
//! The host installs, updates and removes package files. [`Installer`]
//! awaits the host's step and then runs the registry steps as one
//! synchronous continuation, so hosts that finish immediately and hosts
//! that finish later go through the same path. When the host step fails,
//! the continuation does not run.

use std::fmt;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::hooks::{HookContext, PackageHook};
use crate::package::PackageDescriptor;
use crate::registry::Registry;

/// The host package manager's own file operations.
#[async_trait]
pub trait HostInstaller: Send + Sync {
    /// Place the package files on disk.
    async fn install(&self, package: &PackageDescriptor) -> Result<()>;

    /// Replace the files of `initial` with those of `target`.
    async fn update(&self, initial: &PackageDescriptor, target: &PackageDescriptor)
    -> Result<()>;

    /// Remove the package files.
    async fn uninstall(&self, package: &PackageDescriptor) -> Result<()>;
}

/// Host for packages that are already materialized on disk.
///
/// Every step succeeds immediately without touching any file.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterializedHost;

#[async_trait]
impl HostInstaller for MaterializedHost {
    async fn install(&self, package: &PackageDescriptor) -> Result<()> {
        tracing::debug!(package = %package.name, "Package already materialized");
        Ok(())
    }

    async fn update(
        &self,
        _initial: &PackageDescriptor,
        target: &PackageDescriptor,
    ) -> Result<()> {
        tracing::debug!(package = %target.name, "Package already materialized");
        Ok(())
    }

    async fn uninstall(&self, package: &PackageDescriptor) -> Result<()> {
        tracing::debug!(package = %package.name, "Leaving package files to the host");
        Ok(())
    }
}

/// One completed step of a lifecycle operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleStep {
    HostInstalled,
    HostUpdated,
    HostUninstalled,
    RecordAdded,
    RecordRemoved,
    TranslationsRegistered(Vec<String>),
    TranslationsUnregistered(Vec<String>),
    ConfigMerged(Vec<String>),
    ConfigUnmerged(Vec<String>),
    HookRan(String),
}

impl fmt::Display for LifecycleStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HostInstalled => write!(f, "host install"),
            Self::HostUpdated => write!(f, "host update"),
            Self::HostUninstalled => write!(f, "host uninstall"),
            Self::RecordAdded => write!(f, "record added"),
            Self::RecordRemoved => write!(f, "record removed"),
            Self::TranslationsRegistered(c) => {
                write!(f, "translations registered [{}]", c.join(", "))
            }
            Self::TranslationsUnregistered(c) => {
                write!(f, "translations unregistered [{}]", c.join(", "))
            }
            Self::ConfigMerged(t) => write!(f, "config merged [{}]", t.join(", ")),
            Self::ConfigUnmerged(t) => write!(f, "config unmerged [{}]", t.join(", ")),
            Self::HookRan(name) => write!(f, "hook {name}"),
        }
    }
}

/// Runs install, update and uninstall for one storage root.
#[derive(Debug)]
pub struct Installer<H> {
    registry: Registry,
    host: H,
    hooks: Vec<Box<dyn PackageHook>>,
}

impl<H: HostInstaller> Installer<H> {
    /// Installer with the hooks declared in the registry settings.
    pub fn new(registry: Registry, host: H) -> Self {
        let hooks = registry.hooks();
        Self {
            registry,
            host,
            hooks,
        }
    }

    /// Add a hook after the configured ones.
    pub fn with_hook(mut self, hook: impl PackageHook + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Whether packages of `package_type` are handled.
    pub fn supports(&self, package_type: &str) -> bool {
        package_type == self.registry.settings().package_type
    }

    /// Reject the package before the host runs or any file changes.
    fn ensure_supported(&self, package: &PackageDescriptor) -> Result<()> {
        if !self.supports(&package.package_type) {
            return Err(Error::UnsupportedPackageType {
                name: package.name.clone(),
                package_type: package.package_type.clone(),
                expected: self.registry.settings().package_type.clone(),
            });
        }
        self.registry.check_config(package)
    }

    /// Install `package`. Nothing is recorded unless the host succeeds.
    pub async fn install(&self, package: &PackageDescriptor) -> Result<Vec<LifecycleStep>> {
        self.ensure_supported(package)?;
        self.host.install(package).await?;

        let mut steps = vec![LifecycleStep::HostInstalled];
        self.register(package, &mut steps)?;
        self.run_hooks(package, package, true, &mut steps)?;
        Ok(steps)
    }

    /// Update `initial` to `target`.
    ///
    /// The target's config and translations are removed before the host
    /// runs, and are not restored if it fails.
    pub async fn update(
        &self,
        initial: &PackageDescriptor,
        target: &PackageDescriptor,
    ) -> Result<Vec<LifecycleStep>> {
        self.ensure_supported(target)?;
        let mut steps = Vec::new();
        self.unregister(target, &mut steps)?;

        self.host.update(initial, target).await?;
        steps.push(LifecycleStep::HostUpdated);

        self.registry.remove_package(initial)?;
        steps.push(LifecycleStep::RecordRemoved);
        self.register(target, &mut steps)?;
        self.run_hooks(initial, target, true, &mut steps)?;
        Ok(steps)
    }

    /// Uninstall `package`.
    ///
    /// Config and translations are removed before the host runs; the
    /// record is removed only after it succeeds.
    pub async fn uninstall(&self, package: &PackageDescriptor) -> Result<Vec<LifecycleStep>> {
        self.ensure_supported(package)?;
        let mut steps = Vec::new();
        self.unregister(package, &mut steps)?;

        self.host.uninstall(package).await?;
        steps.push(LifecycleStep::HostUninstalled);

        self.registry.remove_package(package)?;
        steps.push(LifecycleStep::RecordRemoved);
        self.run_hooks(package, package, false, &mut steps)?;
        Ok(steps)
    }

    fn register(&self, package: &PackageDescriptor, steps: &mut Vec<LifecycleStep>) -> Result<()> {
        self.registry.add_package(package)?;
        steps.push(LifecycleStep::RecordAdded);
        let categories = self.registry.add_translations(package)?;
        steps.push(LifecycleStep::TranslationsRegistered(categories));
        let targets = self.registry.add_config(package)?;
        steps.push(LifecycleStep::ConfigMerged(targets));
        Ok(())
    }

    fn unregister(&self, package: &PackageDescriptor, steps: &mut Vec<LifecycleStep>) -> Result<()> {
        let targets = self.registry.remove_config(package)?;
        steps.push(LifecycleStep::ConfigUnmerged(targets));
        let categories = self.registry.remove_translations(package)?;
        steps.push(LifecycleStep::TranslationsUnregistered(categories));
        Ok(())
    }

    /// Run hooks matching `trigger` with `package` as their subject.
    fn run_hooks(
        &self,
        trigger: &PackageDescriptor,
        package: &PackageDescriptor,
        installed: bool,
        steps: &mut Vec<LifecycleStep>,
    ) -> Result<()> {
        let ctx = HookContext {
            layout: self.registry.layout(),
            package,
        };
        for hook in self.hooks.iter().filter(|h| h.matches(trigger)) {
            let outcome = if installed {
                hook.after_install(&ctx)
            } else {
                hook.after_uninstall(&ctx)
            };
            outcome.map_err(|e| Error::Hook {
                hook: hook.name().to_string(),
                package: package.name.clone(),
                source: Box::new(e),
            })?;
            steps.push(LifecycleStep::HookRan(hook.name().to_string()));
        }
        Ok(())
    }
}
