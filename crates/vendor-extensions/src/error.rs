use std::path::PathBuf;

/// Errors that can occur in the extension registry.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Filesystem or config (de)serialization failure.
    #[error(transparent)]
    Fs(#[from] vendor_fs::Error),

    /// Failed to parse a package descriptor.
    #[error("failed to parse package descriptor at {path}: {reason}")]
    DescriptorParse { path: PathBuf, reason: String },

    /// Invalid package name.
    #[error("invalid package name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// A package declared a config fragment that cannot be merged.
    #[error("invalid config fragment '{target}' in package '{package}': {reason}")]
    InvalidFragment {
        package: String,
        target: String,
        reason: String,
    },

    /// A generated config file does not hold a mapping at the top level.
    #[error("config file {path} must contain a mapping at the top level")]
    NotAMapping { path: PathBuf },

    /// Settings file holds values the registry cannot work with.
    #[error("invalid settings: {reason}")]
    InvalidSettings { reason: String },

    /// Package type is not handled by this installer.
    #[error("package '{name}' has unsupported type '{package_type}' (expected '{expected}')")]
    UnsupportedPackageType {
        name: String,
        package_type: String,
        expected: String,
    },

    /// The host package manager failed its own install/update/uninstall step.
    #[error("host {operation} of '{package}' failed: {message}")]
    Host {
        operation: String,
        package: String,
        message: String,
    },

    /// A package hook failed.
    #[error("hook '{hook}' failed for '{package}': {source}")]
    Hook {
        hook: String,
        package: String,
        #[source]
        source: Box<Error>,
    },

    /// Extension not found in the manifest.
    #[error("unknown extension: {0}")]
    UnknownExtension(String),
}

pub type Result<T> = std::result::Result<T, Error>;
