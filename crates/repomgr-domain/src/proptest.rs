//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Version ordering (numeric, transitive, prefix-insensitive)
//! - Monotonicity of the minimum-version rule
//! - Determinism and idempotence of rule evaluation

use crate::model::Require;
use crate::rules::{min_version_rule, no_module_rule};
use crate::test_support::{go_repo, require};
use crate::version::Version;
use proptest::prelude::*;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

fn arb_core() -> impl Strategy<Value = (u64, u64, u64)> {
    (0u64..30, 0u64..30, 0u64..30)
}

/// Version strings as they appear in go.mod and tags.
fn arb_version_string() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_core().prop_map(|(a, b, c)| format!("v{a}.{b}.{c}")),
        arb_core().prop_map(|(a, b, c)| format!("{a}.{b}.{c}")),
        arb_core().prop_map(|(a, b, _)| format!("{a}.{b}")),
        (arb_core(), prop_oneof![Just("alpha"), Just("beta.2"), Just("rc.1")])
            .prop_map(|((a, b, c), pre)| format!("v{a}.{b}.{c}-{pre}")),
    ]
}

/// Module paths shaped like `host/owner/name`.
fn arb_module() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{1,8}\\.(com|org|io)/[a-z][a-z0-9-]{0,8}/[a-z][a-z0-9-]{0,8}")
        .expect("valid regex")
}

fn arb_requires() -> impl Strategy<Value = Vec<Require>> {
    prop::collection::vec(
        (arb_module(), arb_version_string()).prop_map(|(m, v)| require(&m, &v)),
        0..6,
    )
}

// ============================================================================
// Version ordering
// ============================================================================

proptest! {
    #[test]
    fn version_order_matches_numeric_tuple(a in arb_core(), b in arb_core()) {
        let va = Version::parse(&format!("v{}.{}.{}", a.0, a.1, a.2)).expect("parse a");
        let vb = Version::parse(&format!("{}.{}.{}", b.0, b.1, b.2)).expect("parse b");
        prop_assert_eq!(va.cmp(&vb), a.cmp(&b));
    }

    #[test]
    fn release_outranks_its_prereleases(core in arb_core(), pre in "[a-z]{1,6}(\\.[1-9][0-9]{0,2})?") {
        let release = Version::parse(&format!("{}.{}.{}", core.0, core.1, core.2)).expect("release");
        let candidate = Version::parse(&format!("{}.{}.{}-{}", core.0, core.1, core.2, pre)).expect("pre");
        prop_assert!(candidate < release);
    }

    #[test]
    fn parse_never_panics(input in ".{0,40}") {
        let _ = Version::parse(&input);
    }
}

// ============================================================================
// Rule properties
// ============================================================================

proptest! {
    /// Warns iff the requirement is absent, unparsable or strictly lower.
    #[test]
    fn min_version_rule_is_monotonic(
        module in arb_module(),
        min in arb_version_string(),
        actual in prop::option::of(prop_oneof![arb_version_string(), Just("garbage".to_string())]),
    ) {
        let min_version = Version::parse(&min).expect("strategy yields valid versions");
        let rule = min_version_rule(&module, min_version.clone());

        let requires = actual.iter().map(|v| require(&module, v)).collect();
        let warned = !rule.evaluate(&go_repo(None, requires)).is_empty();

        let expected = match actual.as_deref().map(Version::parse) {
            None => true,
            Some(Err(_)) => true,
            Some(Ok(v)) => v < min_version,
        };
        prop_assert_eq!(warned, expected);
    }

    #[test]
    fn no_module_rule_is_idempotent(module in arb_module(), requires in arb_requires()) {
        let rule = no_module_rule(&module);
        let repo = go_repo(Some("1.22"), requires);

        let first = rule.evaluate(&repo);
        let second = rule.evaluate(&repo);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.len() <= 1);
        prop_assert_eq!(first.is_empty(), repo.find_require(&module).is_none());
    }
}
