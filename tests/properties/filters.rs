//! Property tests for include/exclude filter evaluation.

use std::path::Path;

use proptest::prelude::*;

use sitepush::filter::SyncFilter;

/// Lowercase literal tokens: under case-insensitive regex search these
/// behave as plain substring patterns, so the expected outcome can be
/// computed without re-running a regex.
fn literal_token() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z0-9]{1,10}").unwrap()
}

fn token_list() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(literal_token(), 1..=4)
}

fn path_segments() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(literal_token(), 1..=4)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A path matching any exclude pattern is rejected no matter
    /// what the include list says.
    #[test]
    fn property_exclude_wins_over_any_include(
        segments in path_segments(),
        extension in literal_token(),
        includes in token_list(),
    ) {
        let path = format!("{}.{}", segments.join("/"), extension);
        let filter = SyncFilter::new(
            Some(&includes.join(",")),
            Some(&format!(r"\.{extension}$")),
        ).unwrap();

        prop_assert!(!filter.should_sync(Path::new(&path)));
    }

    /// PROPERTY: With includes and no excludes, a path is accepted iff it
    /// contains at least one include token.
    #[test]
    fn property_include_accepts_iff_any_match(
        segments in path_segments(),
        includes in token_list(),
    ) {
        let path = segments.join("/");
        let filter = SyncFilter::new(Some(&includes.join(",")), None).unwrap();

        let expected = includes.iter().any(|token| path.contains(token.as_str()));
        prop_assert_eq!(filter.should_sync(Path::new(&path)), expected);
    }

    /// PROPERTY: Without any rules every path is accepted.
    #[test]
    fn property_no_rules_accepts_everything(
        segments in path_segments(),
    ) {
        let filter = SyncFilter::new(None, None).unwrap();
        prop_assert!(filter.should_sync(Path::new(&segments.join("/"))));
    }

    /// PROPERTY: Matching ignores the case of the candidate path.
    #[test]
    fn property_decision_survives_case_change(
        segments in path_segments(),
        includes in token_list(),
        excludes in token_list(),
    ) {
        let path = segments.join("/");
        let filter = SyncFilter::new(
            Some(&includes.join(",")),
            Some(&excludes.join(",")),
        ).unwrap();

        let lower = filter.should_sync(Path::new(&path));
        let upper = filter.should_sync(Path::new(&path.to_uppercase()));
        prop_assert_eq!(lower, upper);
    }

    /// PROPERTY: Compiling arbitrary pattern lists never panics; invalid
    /// patterns surface as errors.
    #[test]
    fn property_filter_construction_never_panics(
        include in "(?s).{0,64}",
        exclude in "(?s).{0,64}",
    ) {
        let _ = SyncFilter::new(Some(&include), Some(&exclude));
    }
}
