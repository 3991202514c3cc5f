#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Fuzz remote path normalization - this should never panic
        let normalized = sitepush::paths::normalize_remote(content);
        let _ = sitepush::paths::join_remote(&normalized, "file.bin");
    }
});
