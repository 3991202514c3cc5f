//! Property tests for remote path normalization and projection.

use std::path::Path;

use proptest::prelude::*;

use sitepush::paths::{join_remote, normalize_remote, remote_folder_for};

fn segment() -> impl Strategy<Value = String> {
    // no dots: "." and ".." segments would be collapsed by Path::components
    proptest::string::string_regex("[A-Za-z0-9_-]{1,12}").unwrap()
}

fn segments() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(segment(), 0..=5)
}

fn file_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_-]{1,12}\\.[a-z]{1,4}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Normalization never panics on arbitrary input.
    #[test]
    fn property_normalize_never_panics(
        s in "(?s).{0,256}"
    ) {
        let _ = normalize_remote(&s);
    }

    /// PROPERTY: A normalized path is rooted, free of duplicate slashes and
    /// carries no trailing slash (except the root itself).
    #[test]
    fn property_normalized_shape(
        s in "[A-Za-z0-9._/\\\\-]{0,64}"
    ) {
        let normalized = normalize_remote(&s);

        prop_assert!(normalized.starts_with('/'));
        prop_assert!(!normalized.contains("//"));
        prop_assert!(normalized == "/" || !normalized.ends_with('/'));
    }

    /// PROPERTY: Normalization is idempotent.
    #[test]
    fn property_normalize_idempotent(
        s in "[A-Za-z0-9._/\\\\-]{0,64}"
    ) {
        let once = normalize_remote(&s);
        prop_assert_eq!(normalize_remote(&once), once);
    }

    /// PROPERTY: Joining a file name onto a normalized folder never doubles
    /// the slash.
    #[test]
    fn property_join_never_doubles_slash(
        folder_segments in segments(),
        name in file_name(),
    ) {
        let folder = normalize_remote(&folder_segments.join("/"));
        let joined = join_remote(&folder, &name);

        prop_assert!(!joined.contains("//"));
        prop_assert!(joined.ends_with(&name));
    }

    /// PROPERTY: A file under the mapping source projects onto the
    /// destination followed by its relative directory chain.
    #[test]
    fn property_projection_keeps_relative_chain(
        relative in proptest::collection::vec(segment(), 0..=3),
        destination_segments in segments(),
        name in file_name(),
    ) {
        let source = Path::new("src-root");
        let mut file = source.to_path_buf();
        for part in &relative {
            file.push(part);
        }
        file.push(&name);

        let destination = normalize_remote(&destination_segments.join("/"));
        let folder = remote_folder_for(source, &destination, &file).unwrap();

        let mut expected = destination.clone();
        for part in &relative {
            expected.push('/');
            expected.push_str(part);
        }
        prop_assert_eq!(folder, normalize_remote(&expected));
    }
}
