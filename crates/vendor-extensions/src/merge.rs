//! Tree merge and structural key-diff over config values.
//!
//! [`deep_merge`] folds a fragment into a base tree. [`structural_key_diff`]
//! approximates the reverse: it removes from a base tree every key the
//! fragment could have contributed. It is a heuristic and not an exact
//! inverse of [`deep_merge`]:
//!
//! - A key contributed by two fragments is removed as soon as either one is
//!   diffed out, even though the other still wants it.
//! - A key the fragment overwrote is removed, not restored to the value it
//!   held before the merge.
//! - A mapping the fragment replaced by a scalar (or the other way round) is
//!   removed whole.
//!
//! Values are never compared, only keys and node kinds.

use serde_json::{Map, Value};

/// Deep merge `fragment` into `base`.
///
/// If both values are objects, merge them recursively with `fragment` taking
/// precedence. Otherwise, `fragment` replaces `base`; sequences are replaced
/// wholesale rather than concatenated.
pub fn deep_merge(base: &mut Value, fragment: &Value) {
    match (base, fragment) {
        (Value::Object(base_map), Value::Object(fragment_map)) => {
            merge_maps(base_map, fragment_map);
        }
        (base, fragment) => {
            *base = fragment.clone();
        }
    }
}

/// Deep merge two mappings in place.
pub fn merge_maps(base: &mut Map<String, Value>, fragment: &Map<String, Value>) {
    for (key, fragment_val) in fragment {
        if let Some(base_val) = base.get_mut(key) {
            deep_merge(base_val, fragment_val);
        } else {
            base.insert(key.clone(), fragment_val.clone());
        }
    }
}

/// Keys of `base` not explained by `fragment`.
///
/// - Keys only in `base` are kept.
/// - Keys in both, where both values are objects, are diffed recursively;
///   the key is dropped when nothing is left below it.
/// - Any other key present in both is dropped.
pub fn structural_key_diff(
    base: &Map<String, Value>,
    fragment: &Map<String, Value>,
) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, base_val) in base {
        match (base_val, fragment.get(key)) {
            (_, None) => {
                out.insert(key.clone(), base_val.clone());
            }
            (Value::Object(base_child), Some(Value::Object(fragment_child))) => {
                let rest = structural_key_diff(base_child, fragment_child);
                if !rest.is_empty() {
                    out.insert(key.clone(), Value::Object(rest));
                }
            }
            (_, Some(_)) => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_deep_merge_objects() {
        let mut base = json!({"a": 1, "b": {"x": 10, "y": 20}});
        deep_merge(&mut base, &json!({"b": {"y": 30, "z": 40}, "c": 3}));
        assert_eq!(base, json!({"a": 1, "b": {"x": 10, "y": 30, "z": 40}, "c": 3}));
    }

    #[test]
    fn test_deep_merge_replaces_sequences() {
        let mut base = json!({"bootstrap": ["log", "debug"]});
        deep_merge(&mut base, &json!({"bootstrap": ["gii"]}));
        assert_eq!(base, json!({"bootstrap": ["gii"]}));
    }

    #[test]
    fn test_deep_merge_scalar_over_object() {
        let mut base = json!({"cache": {"class": "FileCache"}});
        deep_merge(&mut base, &json!({"cache": false}));
        assert_eq!(base, json!({"cache": false}));
    }

    #[test]
    fn test_key_diff_drops_emptied_subtrees() {
        let base = object(json!({
            "components": {"widgets": {"class": "W"}, "db": {"dsn": "x"}},
            "params": {"only": true}
        }));
        let fragment = object(json!({"components": {"widgets": {"class": "W"}}, "params": {"only": 1}}));
        assert_eq!(
            structural_key_diff(&base, &fragment),
            object(json!({"components": {"db": {"dsn": "x"}}}))
        );
    }

    #[test]
    fn test_key_diff_ignores_values() {
        // The fragment's value differs, the key is still dropped.
        let base = object(json!({"name": "host app", "id": "app"}));
        let fragment = object(json!({"name": "ext"}));
        assert_eq!(structural_key_diff(&base, &fragment), object(json!({"id": "app"})));
    }

    #[test]
    fn test_key_diff_shared_contribution_is_removed_for_both() {
        let mut file = json!({});
        let first = json!({"modules": {"gii": {"class": "G"}}});
        let second = json!({"modules": {"gii": {"class": "G"}, "debug": {"class": "D"}}});
        deep_merge(&mut file, &first);
        deep_merge(&mut file, &second);

        let remaining = structural_key_diff(&object(file), &object(second));
        // `gii` is gone although `first` still contributes it.
        assert!(remaining.is_empty());
    }

    #[test]
    fn test_key_diff_mixed_kinds_drop_key() {
        let base = object(json!({"log": {"targets": []}, "keep": 1}));
        let fragment = object(json!({"log": "file"}));
        assert_eq!(structural_key_diff(&base, &fragment), object(json!({"keep": 1})));
    }

    fn leaf() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<bool>().prop_map(Value::from),
            any::<i32>().prop_map(Value::from),
            "[a-z]{0,6}".prop_map(Value::from),
            Just(Value::Null),
            prop::collection::vec(any::<i32>().prop_map(Value::from), 0..3).prop_map(Value::Array),
        ]
    }

    fn tree() -> impl Strategy<Value = Value> {
        leaf().prop_recursive(3, 24, 4, |inner| {
            prop::collection::btree_map("[a-d]", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect()))
        })
    }

    fn tree_map(prefix: &'static str) -> impl Strategy<Value = Map<String, Value>> {
        prop::collection::btree_map("[a-d]", tree(), 0..4).prop_map(move |m| {
            m.into_iter()
                .map(|(k, v)| (format!("{prefix}{k}"), v))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn merge_is_idempotent(base in tree_map(""), fragment in tree_map("")) {
            let mut once = Value::Object(base);
            deep_merge(&mut once, &Value::Object(fragment.clone()));
            let mut twice = once.clone();
            deep_merge(&mut twice, &Value::Object(fragment));
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn diff_reverses_disjoint_merge(base in tree_map("base_"), fragment in tree_map("frag_")) {
            let mut merged = base.clone();
            merge_maps(&mut merged, &fragment);
            prop_assert_eq!(structural_key_diff(&merged, &fragment), base);
        }

        #[test]
        fn diff_against_empty_is_identity(base in tree_map("")) {
            prop_assert_eq!(structural_key_diff(&base, &Map::new()), base);
        }
    }
}
