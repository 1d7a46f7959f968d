use std::fs;

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tempfile::TempDir;
use vendor_fs::{ConfigFormat, ConfigStore, NormalizedPath};

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
struct TestConfig {
    name: String,
    count: i32,
}

#[test]
fn test_load_toml() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.toml");
    fs::write(&file_path, "name = \"test\"\ncount = 42").unwrap();

    let store = ConfigStore::new();
    let path = NormalizedPath::new(&file_path);
    let config: TestConfig = store.load(&path).unwrap();

    assert_eq!(config.name, "test");
    assert_eq!(config.count, 42);
}

#[test]
fn test_load_json() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.json");
    fs::write(&file_path, r#"{"name": "test", "count": 42}"#).unwrap();

    let store = ConfigStore::new();
    let path = NormalizedPath::new(&file_path);
    let config: TestConfig = store.load(&path).unwrap();

    assert_eq!(config, TestConfig { name: "test".into(), count: 42 });
}

#[test]
fn test_load_yaml() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.yaml");
    fs::write(&file_path, "name: test\ncount: 42").unwrap();

    let store = ConfigStore::new();
    let path = NormalizedPath::new(&file_path);
    let config: TestConfig = store.load(&path).unwrap();

    assert_eq!(config, TestConfig { name: "test".into(), count: 42 });
}

#[test]
fn test_load_or_default_missing_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("absent.toml"));

    let config: TestConfig = ConfigStore::new().load_or_default(&path).unwrap();

    assert_eq!(config, TestConfig::default());
    assert!(!path.exists(), "loading must not create the file");
}

#[test]
fn test_load_parse_error_reports_format() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("broken.toml");
    fs::write(&file_path, "name = ").unwrap();

    let result: vendor_fs::Result<TestConfig> =
        ConfigStore::new().load(&NormalizedPath::new(&file_path));

    match result {
        Err(vendor_fs::Error::ConfigParse { format, .. }) => assert_eq!(format, "TOML"),
        other => panic!("expected ConfigParse, got {other:?}"),
    }
}

#[test]
fn test_save_toml_with_header() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("config.toml"));

    let store = ConfigStore::with_header("Auto generated\nDo not edit");
    store.save(&path, &TestConfig { name: "test".into(), count: 42 }).unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert!(content.starts_with("# Auto generated\n# Do not edit\n\n"));
    assert!(content.contains("name = \"test\""));
    assert!(content.contains("count = 42"));
}

#[test]
fn test_save_json_skips_header() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("config.json"));

    let store = ConfigStore::with_header("Auto generated");
    store.save(&path, &TestConfig { name: "test".into(), count: 42 }).unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert!(content.starts_with('{'));
    let parsed: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed, json!({"name": "test", "count": 42}));
}

#[test]
fn test_unsupported_format() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.xyz");
    fs::write(&file_path, "data").unwrap();

    let store = ConfigStore::new();
    let path = NormalizedPath::new(&file_path);
    let result: vendor_fs::Result<TestConfig> = store.load(&path);

    assert!(matches!(result, Err(vendor_fs::Error::UnsupportedFormat { .. })));
}

#[rstest]
#[case("config.toml", ConfigFormat::Toml)]
#[case("config.json", ConfigFormat::Json)]
#[case("config.yaml", ConfigFormat::Yaml)]
#[case("config.YML", ConfigFormat::Yaml)]
fn test_format_detection(#[case] name: &str, #[case] expected: ConfigFormat) {
    let path = NormalizedPath::new(format!("/srv/vendor/{name}"));
    assert_eq!(ConfigFormat::from_path(&path).unwrap(), expected);
}

#[rstest]
#[case("tree.toml")]
#[case("tree.json")]
#[case("tree.yaml")]
fn test_nested_tree_roundtrip(#[case] name: &str) {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join(name));
    let tree = json!({
        "components": {
            "cache": {"class": "FileCache", "ttl": 60},
            "hosts": ["a", "b"]
        },
        "debug": true
    });

    let store = ConfigStore::with_header("Auto generated");
    store.save(&path, &tree).unwrap();
    let loaded: Value = store.load(&path).unwrap();

    assert_eq!(loaded, tree);
}
