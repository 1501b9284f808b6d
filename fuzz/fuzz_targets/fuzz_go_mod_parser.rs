//! Fuzz target for go.mod parsing.
//!
//! Goal: The parser should **never panic** on any input.
//! It may return errors, but panics are unacceptable.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_go_mod_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // go.mod must be UTF-8
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = repomgr_repo::fuzz::parse_go_mod(text);
    }
});
