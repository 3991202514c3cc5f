#![no_main]

use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Fuzz filter compilation - invalid patterns must error, not panic
        if let Ok(filter) = sitepush::SyncFilter::new(Some(content), Some(content)) {
            let _ = filter.should_sync(Path::new(content));
        }
    }
});
