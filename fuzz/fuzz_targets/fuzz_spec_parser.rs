//! Fuzz target for spec file loading.
//!
//! Goal: Parsing and resolving a spec should **never panic** on any input.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_spec_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = repomgr_settings::load_spec_str(text);
    }
});
