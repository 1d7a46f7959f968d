//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Vendor Registry - Track installed extensions and merge their config
#[derive(Parser, Debug)]
#[command(name = "vendor-registry")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Storage root holding installed packages (defaults to the current directory)
    #[arg(long, env = "VENDOR_REGISTRY_ROOT", global = true)]
    pub root: Option<PathBuf>,

    /// Settings file (defaults to vendor-registry.toml below the root)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create the manifest and the expected config files
    ///
    /// Existing files are left untouched.
    Activate,

    /// Register an installed package
    ///
    /// Examples:
    ///   vendor-registry install descriptors/acme-widgets.json
    Install {
        /// Path to the package descriptor (JSON)
        descriptor: PathBuf,
    },

    /// Replace the registration of one package version with another
    Update {
        /// Descriptor of the currently installed version
        initial: PathBuf,

        /// Descriptor of the incoming version
        target: PathBuf,
    },

    /// Remove a package's registration
    Uninstall {
        /// Path to the package descriptor (JSON)
        descriptor: PathBuf,
    },

    /// List registered extensions
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show one extension with its aliases resolved
    Show {
        /// Package name (vendor/package)
        name: String,
    },

    /// Preview the translation categories a package ships
    Translations {
        /// Path to the package descriptor (JSON)
        descriptor: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_install() {
        let cli = Cli::parse_from(["vendor-registry", "install", "pkg.json"]);
        assert_eq!(
            cli.command,
            Some(Commands::Install {
                descriptor: PathBuf::from("pkg.json")
            })
        );
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["vendor-registry", "list", "--json", "--root", "/srv/vendor", "-v"]);
        assert_eq!(cli.command, Some(Commands::List { json: true }));
        assert_eq!(cli.root, Some(PathBuf::from("/srv/vendor")));
        assert!(cli.verbose);
    }

    #[test]
    fn parse_update_takes_two_descriptors() {
        let cli = Cli::parse_from(["vendor-registry", "update", "old.json", "new.json"]);
        assert_eq!(
            cli.command,
            Some(Commands::Update {
                initial: PathBuf::from("old.json"),
                target: PathBuf::from("new.json"),
            })
        );
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::parse_from(["vendor-registry"]);
        assert!(cli.command.is_none());
    }
}
