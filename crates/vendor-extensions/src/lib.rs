//! Extension registry and configuration merge engine for Vendor Registry.
//!
//! This crate derives extension records from installed packages, keeps the
//! generated manifest, merges package config fragments into shared config
//! files, registers translation sources, and sequences all of it around
//! the host package manager's install, update and uninstall steps.

pub mod alias;
pub mod config_file;
pub mod error;
pub mod hooks;
pub mod installer;
pub mod manifest;
pub mod merge;
pub mod package;
pub mod registry;
pub mod settings;
pub mod translations;

pub use alias::{AliasResolver, ROOT_PLACEHOLDER};
pub use config_file::ConfigFileStore;
pub use error::{Error, Result};
pub use hooks::{BridgeConfig, BridgeFilesHook, HookContext, PackageHook};
pub use installer::{HostInstaller, Installer, LifecycleStep, MaterializedHost};
pub use manifest::{ExtensionRecord, Manifest, ManifestStore};
pub use merge::{deep_merge, structural_key_diff};
pub use package::{Autoload, AutoloadPaths, PackageDescriptor};
pub use registry::Registry;
pub use settings::{RegistrySettings, TranslationSettings};
pub use translations::TranslationRegistrar;
