use assert_fs::prelude::*;
use serde_json::{Value, json};
use vendor_fs::{ConfigStore, NormalizedPath};

#[test]
fn snapshot_generated_flat_config() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("registry/config/bootstrap.toml");

    let store = ConfigStore::with_header("Auto generated by vendor-registry. Do not edit.");
    let tree = json!({"name": "demo", "debug": true});
    store.save(&NormalizedPath::new(file.path()), &tree).unwrap();

    let content = std::fs::read_to_string(file.path()).unwrap();
    insta::assert_snapshot!(content, @r###"
    # Auto generated by vendor-registry. Do not edit.

    name = "demo"
    debug = true
    "###);
}

#[test]
fn generated_nested_config_reads_back() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("registry/config/web.toml");

    let store = ConfigStore::with_header("Auto generated by vendor-registry. Do not edit.");
    let tree = json!({
        "name": "demo",
        "components": {
            "request": {"cookieValidationKey": ""},
            "urlManager": {"enablePrettyUrl": true}
        }
    });
    let path = NormalizedPath::new(file.path());
    store.save(&path, &tree).unwrap();

    file.assert(predicates::str::starts_with("# Auto generated"));
    file.assert(predicates::str::contains("cookieValidationKey = \"\""));
    let loaded: Value = store.load(&path).unwrap();
    assert_eq!(loaded, tree);
}
