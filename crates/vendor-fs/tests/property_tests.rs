use proptest::prelude::*;
use vendor_fs::NormalizedPath;

proptest! {
    #[test]
    fn test_normalization_invariants(s in "\\PC*") {
        let path = NormalizedPath::new(&s);
        let as_str = path.as_str();

        // No backslashes in normalized path
        prop_assert!(!as_str.contains('\\'));

        // No double slashes except a leading network prefix
        let is_network = as_str.starts_with("//") && !as_str.starts_with("///");
        if is_network {
            prop_assert!(!as_str[2..].contains("//"));
        } else {
            prop_assert!(!as_str.contains("//"));
        }

        // No dot segments survive
        prop_assert!(!as_str.split('/').any(|seg| seg == ".") || as_str == ".");

        // Normalizing twice changes nothing
        let again = NormalizedPath::new(path.to_native());
        prop_assert_eq!(path, again);
    }

    #[test]
    fn test_join_properties(a in "\\PC*", b in "\\PC*") {
        let p1 = NormalizedPath::new(&a);
        let joined = p1.join(&b);

        prop_assert!(!joined.as_str().contains('\\'));

        if b.is_empty() || b == "." {
            prop_assert_eq!(joined, p1);
        }
    }

    #[test]
    fn test_strip_root_reconstructs_path(
        root in "/[a-z]{1,8}(/[a-z]{1,8}){0,3}",
        rest in "(/[a-z]{1,8}){0,4}",
    ) {
        let root_path = NormalizedPath::new(&root);
        let full = NormalizedPath::new(format!("{root}{rest}"));
        let suffix = full.strip_root(&root_path);
        prop_assert_eq!(suffix, Some(rest.as_str()));
    }
}
