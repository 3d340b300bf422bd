#![no_main]

use libfuzzer_sys::fuzz_target;
use vigil::CleanupConfig;

// Arbitrary bytes must never panic the config deserializer.
fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = serde_json::from_str::<CleanupConfig>(text);
    }
});
