//! Fuzz target for rule params decoding.
//!
//! Builds a spec with one rule whose params come from structured input, so
//! libFuzzer spends its time on key/value shapes instead of YAML syntax.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_rule_params
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct ParamsInput {
    rule: String,
    params: Vec<(String, String)>,
}

fuzz_target!(|input: ParamsInput| {
    if input.params.len() > 16 {
        return;
    }

    let mut text = String::from("version: \"1\"\npolicies:\n  - id: p\n    name: p\n    rules:\n");
    text.push_str(&format!("      - rule: {:?}\n        params:\n", input.rule));
    for (key, value) in &input.params {
        text.push_str(&format!("          {key:?}: {value:?}\n"));
    }

    let _ = repomgr_settings::load_spec_str(&text);
});
