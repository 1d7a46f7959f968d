//! Filesystem abstraction for Vendor Registry
//!
//! Provides normalized path handling, plain text I/O, format-agnostic
//! config loading and the storage-root layout every generated artifact
//! is resolved against.

pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod layout;
pub mod path;

pub use cache::{CacheInvalidator, NoopInvalidator};
pub use config::{ConfigFormat, ConfigStore};
pub use constants::RegistryPath;
pub use error::{Error, Result};
pub use layout::StorageLayout;
pub use path::NormalizedPath;
