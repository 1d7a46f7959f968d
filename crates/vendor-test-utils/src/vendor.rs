//! [`TestVendor`] builder for registry test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

/// A temporary storage root with helper methods for materializing packages
/// and asserting on generated files.
///
/// # Example
///
/// ```rust,no_run
/// use vendor_test_utils::TestVendor;
///
/// let vendor = TestVendor::new();
/// vendor.add_messages("acme/widgets", &["en/app.php", "cs/app.php"]);
/// let descriptor = vendor.write_descriptor(
///     "acme-widgets.json",
///     &TestVendor::descriptor("acme/widgets", "1.0.0"),
/// );
/// vendor.assert_file_exists("acme/widgets/messages/en/app.php");
/// ```
pub struct TestVendor {
    temp_dir: TempDir,
}

impl Default for TestVendor {
    fn default() -> Self {
        Self::new()
    }
}

impl TestVendor {
    /// Package type the registry handles by default.
    pub const PACKAGE_TYPE: &'static str = "vendor-extension";

    /// Create an empty temporary storage root.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the storage root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` below the root.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Minimal descriptor JSON of the default package type.
    pub fn descriptor(name: &str, version: &str) -> Value {
        json!({
            "name": name,
            "version": version,
            "type": Self::PACKAGE_TYPE,
        })
    }

    /// Create the install directory of `package`.
    pub fn add_package_dir(&self, package: &str) -> PathBuf {
        let dir = self.path(package);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Create empty message files below `<package>/messages`.
    pub fn add_messages(&self, package: &str, files: &[&str]) {
        let messages = self.add_package_dir(package).join("messages");
        for file in files {
            let path = messages.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    /// Write a package descriptor below `descriptors/` and return its path.
    pub fn write_descriptor(&self, file_name: &str, descriptor: &Value) -> PathBuf {
        self.write_file(
            &format!("descriptors/{file_name}"),
            &serde_json::to_string_pretty(descriptor).unwrap(),
        )
    }

    /// Read `relative` as text.
    pub fn read(&self, relative: &str) -> String {
        let full_path = self.path(relative);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the root) does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` (relative to the root) contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read(path);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            self.path(path).display(),
            content,
            file_content
        );
    }

    /// Assert that the file at `path` does **not** contain `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or contains `content`.
    pub fn assert_file_not_contains(&self, path: &str, content: &str) {
        let file_content = self.read(path);
        assert!(
            !file_content.contains(content),
            "File {} unexpectedly contains: {}\nActual: {}",
            self.path(path).display(),
            content,
            file_content
        );
    }
}
