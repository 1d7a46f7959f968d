//! Alias derivation from autoload declarations.

use rstest::rstest;
use serde_json::json;
use vendor_extensions::{AliasResolver, PackageDescriptor};
use vendor_fs::StorageLayout;

fn package(autoload: serde_json::Value) -> PackageDescriptor {
    serde_json::from_value(json!({
        "name": "acme/widgets",
        "pretty_name": "Acme/Widgets",
        "version": "1.0.0",
        "autoload": autoload
    }))
    .unwrap()
}

#[rstest]
#[case::relative_psr4("psr-4", "Acme\\Widgets\\", "src/", "@Acme/Widgets", "<vendor-dir>/Acme/Widgets/src")]
#[case::dot_segments("psr-4", "Acme\\", "./lib/../src//", "@Acme", "<vendor-dir>/Acme/Widgets/src")]
#[case::package_root("psr-4", "Acme\\", "", "@Acme", "<vendor-dir>/Acme/Widgets")]
#[case::external_absolute("psr-4", "Ext\\", "/opt/ext/src/", "@Ext", "/opt/ext/src")]
#[case::psr0_namespace_dir("psr-0", "Acme\\Legacy\\", "lib", "@Acme/Legacy", "<vendor-dir>/Acme/Widgets/lib/Acme/Legacy")]
#[case::windows_separators("psr-4", "Acme\\Win\\", "src\\win", "@Acme/Win", "<vendor-dir>/Acme/Widgets/src/win")]
fn alias_for_single_path(
    #[case] convention: &str,
    #[case] prefix: &str,
    #[case] path: &str,
    #[case] alias: &str,
    #[case] expected: &str,
) {
    let layout = StorageLayout::new("/srv/vendor").unwrap();
    let package = package(json!({ convention: { prefix: path } }));

    let aliases = AliasResolver::new(&layout).resolve(&package);

    assert_eq!(aliases.len(), 1, "aliases: {aliases:?}");
    assert_eq!(aliases[alias], expected);
}

#[test]
fn empty_prefix_yields_no_alias() {
    let layout = StorageLayout::new("/srv/vendor").unwrap();
    let package = package(json!({"psr-4": {"": "src/"}}));
    assert!(AliasResolver::new(&layout).resolve(&package).is_empty());
}

#[test]
fn multi_path_mapping_is_skipped() {
    let layout = StorageLayout::new("/srv/vendor").unwrap();
    let package = package(json!({"psr-4": {"Foo\\": ["src1", "src2"], "Bar\\": "src"}}));

    let aliases = AliasResolver::new(&layout).resolve(&package);

    assert_eq!(aliases.keys().collect::<Vec<_>>(), vec!["@Bar"]);
}

#[test]
fn sibling_root_is_not_treated_as_inside() {
    let layout = StorageLayout::new("/srv/vendor").unwrap();
    let package = package(json!({"psr-4": {"Other\\": "/srv/vendor-other/src"}}));

    let aliases = AliasResolver::new(&layout).resolve(&package);

    assert_eq!(aliases["@Other"], "/srv/vendor-other/src");
}
