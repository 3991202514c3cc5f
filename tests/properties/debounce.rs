//! Property tests for the watch-mode debounce latch.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use proptest::prelude::*;

use sitepush::watch::{DebounceLatch, DEBOUNCE_WINDOW};

fn file_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z0-9]{1,12}\\.[a-z]{1,4}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: The first notification for any path is always accepted.
    #[test]
    fn property_first_notification_accepted(
        name in file_name(),
    ) {
        let mut latch = DebounceLatch::new();
        prop_assert!(latch.accept(&PathBuf::from(name), Instant::now()));
    }

    /// PROPERTY: A duplicate notification arriving inside the window is
    /// suppressed.
    #[test]
    fn property_duplicate_inside_window_suppressed(
        name in file_name(),
        delta_ms in 0u64..DEBOUNCE_WINDOW.as_millis() as u64,
    ) {
        let mut latch = DebounceLatch::new();
        let path = PathBuf::from(name);
        let t0 = Instant::now();

        prop_assert!(latch.accept(&path, t0));
        prop_assert!(!latch.accept(&path, t0 + Duration::from_millis(delta_ms)));
    }

    /// PROPERTY: A duplicate notification arriving at or after the window
    /// boundary is accepted again.
    #[test]
    fn property_duplicate_after_window_accepted(
        name in file_name(),
        delta_ms in (DEBOUNCE_WINDOW.as_millis() as u64)..5_000u64,
    ) {
        let mut latch = DebounceLatch::new();
        let path = PathBuf::from(name);
        let t0 = Instant::now();

        prop_assert!(latch.accept(&path, t0));
        prop_assert!(latch.accept(&path, t0 + Duration::from_millis(delta_ms)));
    }

    /// PROPERTY: Notifications for distinct paths are never suppressed,
    /// however rapidly they interleave.
    #[test]
    fn property_distinct_paths_all_accepted(
        stem in proptest::string::string_regex("[a-z0-9]{1,12}").unwrap(),
        deltas in proptest::collection::vec(0u64..100, 1..=8),
    ) {
        let mut latch = DebounceLatch::new();
        let first = PathBuf::from(format!("{stem}.js"));
        let second = PathBuf::from(format!("{stem}.css"));
        let t0 = Instant::now();

        let mut at = t0;
        for (i, delta_ms) in deltas.iter().enumerate() {
            at += Duration::from_millis(*delta_ms);
            let path = if i % 2 == 0 { &first } else { &second };
            prop_assert!(latch.accept(path, at), "event {i} was suppressed");
        }
    }
}
