//! Activate, install, update and uninstall commands.
//!
//! Packages are expected to be on disk already, so the host step is
//! [`MaterializedHost`] and only the registry side runs.

use std::path::Path;

use colored::Colorize;
use vendor_extensions::{Installer, LifecycleStep, MaterializedHost, PackageDescriptor, Registry};

use crate::error::Result;

/// Run the activate command
pub fn run_activate(registry: &Registry) -> Result<()> {
    let created = registry.activate()?;
    if created.is_empty() {
        println!("{} Registry already active", "OK".green().bold());
        return Ok(());
    }
    for path in &created {
        println!("   {} {}", "created".green(), path);
    }
    println!(
        "{} Activated registry at {}",
        "OK".green().bold(),
        registry.layout().root().to_string().cyan()
    );
    Ok(())
}

/// Run the install command
pub async fn run_install(registry: Registry, descriptor: &Path) -> Result<()> {
    let package = PackageDescriptor::from_path(descriptor)?;
    let installer = Installer::new(registry, MaterializedHost);
    let steps = installer.install(&package).await?;
    report("Installed", &package, &steps);
    Ok(())
}

/// Run the update command
pub async fn run_update(registry: Registry, initial: &Path, target: &Path) -> Result<()> {
    let initial = PackageDescriptor::from_path(initial)?;
    let target = PackageDescriptor::from_path(target)?;
    let installer = Installer::new(registry, MaterializedHost);
    let steps = installer.update(&initial, &target).await?;
    report("Updated", &target, &steps);
    Ok(())
}

/// Run the uninstall command
pub async fn run_uninstall(registry: Registry, descriptor: &Path) -> Result<()> {
    let package = PackageDescriptor::from_path(descriptor)?;
    let installer = Installer::new(registry, MaterializedHost);
    let steps = installer.uninstall(&package).await?;
    report("Uninstalled", &package, &steps);
    Ok(())
}

fn report(verb: &str, package: &PackageDescriptor, steps: &[LifecycleStep]) {
    println!(
        "{} {} {} {}",
        "=>".blue().bold(),
        verb,
        package.name.cyan(),
        package.version.dimmed()
    );
    for step in steps {
        println!("   {} {}", "-".dimmed(), step);
    }
}
