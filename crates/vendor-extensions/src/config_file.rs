//! Shared generated config files.
//!
//! A config file is a tree with a mapping at the top. It is loaded as an
//! empty mapping when absent and always rewritten in full.

use std::sync::Arc;

use serde_json::{Map, Value};
use vendor_fs::cache::invalidate_quietly;
use vendor_fs::{CacheInvalidator, ConfigStore, NormalizedPath};

use crate::error::{Error, Result};
use crate::manifest::GENERATED_HEADER;
use crate::merge::{merge_maps, structural_key_diff};

/// Loads, merges and saves config target files.
#[derive(Debug, Clone)]
pub struct ConfigFileStore {
    invalidator: Arc<dyn CacheInvalidator>,
}

impl ConfigFileStore {
    pub fn new(invalidator: Arc<dyn CacheInvalidator>) -> Self {
        Self { invalidator }
    }

    /// Load the tree at `path`; an absent file is an empty mapping.
    pub fn load(&self, path: &NormalizedPath) -> Result<Map<String, Value>> {
        invalidate_quietly(self.invalidator.as_ref(), path);
        if !path.exists() {
            return Ok(Map::new());
        }
        let value: Value = ConfigStore::new().load(path)?;
        match value {
            Value::Object(map) => Ok(map),
            // An empty YAML document parses as null.
            Value::Null => Ok(Map::new()),
            _ => Err(Error::NotAMapping {
                path: path.to_native(),
            }),
        }
    }

    /// Rewrite the file at `path` with `tree`.
    pub fn save(&self, path: &NormalizedPath, tree: &Map<String, Value>) -> Result<()> {
        ConfigStore::with_header(GENERATED_HEADER).save(path, tree)?;
        invalidate_quietly(self.invalidator.as_ref(), path);
        Ok(())
    }

    /// Fail when `fragment` cannot be written in the format of `path`.
    pub fn check_writable(&self, path: &NormalizedPath, fragment: &Map<String, Value>) -> Result<()> {
        ConfigStore::new().render(path, fragment)?;
        Ok(())
    }

    /// Deep merge `fragment` into the file at `path`.
    pub fn merge_in(&self, path: &NormalizedPath, fragment: &Map<String, Value>) -> Result<()> {
        let mut tree = self.load(path)?;
        merge_maps(&mut tree, fragment);
        self.save(path, &tree)
    }

    /// Remove the keys `fragment` contributed to the file at `path`.
    ///
    /// See [`structural_key_diff`] for what "contributed" means.
    pub fn merge_out(&self, path: &NormalizedPath, fragment: &Map<String, Value>) -> Result<()> {
        let tree = self.load(path)?;
        self.save(path, &structural_key_diff(&tree, fragment))
    }

    /// Create the file as an empty mapping when absent. Returns whether it was created.
    pub fn ensure(&self, path: &NormalizedPath) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        self.save(path, &Map::new())?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use vendor_fs::NoopInvalidator;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    fn files() -> ConfigFileStore {
        ConfigFileStore::new(Arc::new(NoopInvalidator))
    }

    #[test]
    fn test_load_missing_is_empty() {
        let temp = tempfile::tempdir().unwrap();
        let path = NormalizedPath::new(temp.path().join("web.toml"));
        assert!(files().load(&path).unwrap().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_merge_in_then_out_restores() {
        let temp = tempfile::tempdir().unwrap();
        let path = NormalizedPath::new(temp.path().join("web.toml"));
        let base = object(json!({"id": "app", "components": {"db": {"dsn": "sqlite"}}}));
        let fragment = object(json!({"components": {"widgets": {"class": "Acme\\Widgets"}}}));
        let files = files();
        files.save(&path, &base).unwrap();

        files.merge_in(&path, &fragment).unwrap();
        let merged = files.load(&path).unwrap();
        assert_eq!(merged["components"]["widgets"]["class"], "Acme\\Widgets");
        assert_eq!(merged["components"]["db"]["dsn"], "sqlite");

        files.merge_out(&path, &fragment).unwrap();
        assert_eq!(files.load(&path).unwrap(), base);
    }

    #[test]
    fn test_json_target() {
        let temp = tempfile::tempdir().unwrap();
        let path = NormalizedPath::new(temp.path().join("modules.json"));
        files()
            .merge_in(&path, &object(json!({"gii": {"class": "G"}})))
            .unwrap();
        let content = std::fs::read_to_string(path.to_native()).unwrap();
        assert!(content.starts_with('{'));
        assert_eq!(files().load(&path).unwrap()["gii"]["class"], "G");
    }

    #[test]
    fn test_non_mapping_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let path = NormalizedPath::new(temp.path().join("web.json"));
        std::fs::write(path.to_native(), "[1, 2]").unwrap();
        assert!(matches!(files().load(&path), Err(Error::NotAMapping { .. })));
    }

    #[test]
    fn test_null_only_writable_where_supported() {
        let fragment = object(json!({"components": {"cache": null, "log": [1, "two"]}}));
        let files = files();
        assert!(files.check_writable(&NormalizedPath::new("/srv/web.toml"), &fragment).is_err());
        assert!(files.check_writable(&NormalizedPath::new("/srv/web.json"), &fragment).is_ok());
        assert!(files.check_writable(&NormalizedPath::new("/srv/web.yaml"), &fragment).is_ok());
        assert!(!NormalizedPath::new("/srv/web.toml").exists());
    }

    #[test]
    fn test_ensure_creates_once() {
        let temp = tempfile::tempdir().unwrap();
        let path = NormalizedPath::new(temp.path().join("config/console.toml"));
        let files = files();
        assert!(files.ensure(&path).unwrap());
        files.merge_in(&path, &object(json!({"a": 1}))).unwrap();
        assert!(!files.ensure(&path).unwrap());
        assert_eq!(files.load(&path).unwrap()["a"], 1);
    }
}
