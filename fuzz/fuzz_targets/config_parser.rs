#![no_main]

use libfuzzer_sys::fuzz_target;
use perfhunt::config::FileConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Malformed perfhunt.toml must be an error, never a panic
        let _ = FileConfig::parse(input);
    }
});
