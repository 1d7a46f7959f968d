//! Read-only commands: list, show and translations.

use std::path::Path;

use colored::Colorize;
use vendor_extensions::{Error, PackageDescriptor, Registry};

use crate::error::Result;

/// Run the list command
pub fn run_list(registry: &Registry, json: bool) -> Result<()> {
    let manifest = registry.manifest().load()?;

    if json {
        let records: Vec<_> = manifest.records().collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if manifest.is_empty() {
        println!("{}", "No extensions registered.".dimmed());
        return Ok(());
    }

    println!("{}", "Registered Extensions".bold());
    println!();
    for record in manifest.records() {
        println!(
            "  {:<32} {} ({} aliases)",
            record.name.green(),
            record.version,
            record.alias.len()
        );
    }
    println!();
    println!("{} {} extensions", "Total:".dimmed(), manifest.len());
    Ok(())
}

/// Run the show command
pub fn run_show(registry: &Registry, name: &str) -> Result<()> {
    let manifest = registry.manifest().load()?;
    let record = manifest
        .get(name)
        .ok_or_else(|| Error::UnknownExtension(name.to_string()))?;

    println!("{} {}", record.name.cyan().bold(), record.version);
    if let Some(bootstrap) = &record.bootstrap {
        println!("  {}", "Bootstrap:".dimmed());
        for entry in bootstrap {
            println!("    {entry}");
        }
    }
    let aliases = record.resolved_aliases(registry.layout().root());
    if !aliases.is_empty() {
        println!("  {}", "Aliases:".dimmed());
        for (alias, path) in &aliases {
            println!("    {:<24} {}", alias.green(), path);
        }
    }
    Ok(())
}

/// Run the translations command
pub fn run_translations(registry: &Registry, descriptor: &Path) -> Result<()> {
    let package = PackageDescriptor::from_path(descriptor)?;
    match registry.translations().discover(&package)? {
        None => println!(
            "{} {} has no message directory",
            "=>".blue().bold(),
            package.name.cyan()
        ),
        Some(categories) if categories.is_empty() => println!(
            "{} {} ships no message files",
            "=>".blue().bold(),
            package.name.cyan()
        ),
        Some(categories) => {
            println!(
                "{} {} ships {} categories",
                "=>".blue().bold(),
                package.name.cyan(),
                categories.len()
            );
            for category in categories {
                println!("   {}", category.green());
            }
        }
    }
    Ok(())
}
