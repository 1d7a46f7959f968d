//! Vendor Registry CLI
//!
//! Registers installed extension packages: keeps the generated manifest and
//! merges package config into the shared config files.
//!
//! # Environment Variables
//!
//! - `VENDOR_REGISTRY_ROOT`: storage root when `--root` is not given
//! - `RUST_LOG`: log filter (default: warnings only, debug with `--verbose`)

mod cli;
mod commands;
mod error;

use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;
use vendor_extensions::Registry;
use vendor_fs::NormalizedPath;

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        println!("{} Vendor Registry CLI", "vendor-registry".green().bold());
        println!();
        println!(
            "Run {} for available commands.",
            "vendor-registry --help".cyan()
        );
        return Ok(());
    };

    let cwd = std::env::current_dir()?;
    let root = absolute(&cwd, cli.root.as_deref().unwrap_or(Path::new(".")));
    if !root.is_dir() {
        return Err(CliError::user(format!(
            "Storage root '{}' is not a directory",
            root.display()
        )));
    }
    let settings = cli
        .settings
        .as_deref()
        .map(|path| NormalizedPath::new(absolute(&cwd, path)));
    let registry = Registry::open(&root, settings.as_ref())?;
    tracing::debug!(root = %registry.layout().root(), "Opened registry");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(execute_command(command, registry, &cwd))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
}

fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

async fn execute_command(cmd: Commands, registry: Registry, cwd: &Path) -> Result<()> {
    match cmd {
        Commands::Activate => commands::run_activate(&registry),
        Commands::Install { descriptor } => {
            commands::run_install(registry, &absolute(cwd, &descriptor)).await
        }
        Commands::Update { initial, target } => {
            commands::run_update(registry, &absolute(cwd, &initial), &absolute(cwd, &target))
                .await
        }
        Commands::Uninstall { descriptor } => {
            commands::run_uninstall(registry, &absolute(cwd, &descriptor)).await
        }
        Commands::List { json } => commands::run_list(&registry, json),
        Commands::Show { name } => commands::run_show(&registry, &name),
        Commands::Translations { descriptor } => {
            commands::run_translations(&registry, &absolute(cwd, &descriptor))
        }
    }
}
