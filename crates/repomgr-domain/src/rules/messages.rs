//! Warning texts.
//!
//! Downstream tooling and test suites match on these strings, so the wording
//! is part of the public contract.

pub fn requirement_present(module: &str) -> String {
    format!("must: requirement `{module}` is present in go.mod")
}

pub fn requirement_at_least(module: &str, min_version: &str) -> String {
    format!("must: requirement `{module}` with AT LEAST this version `{min_version}` is present in go.mod")
}

pub fn requirement_exactly(module: &str, version: &str) -> String {
    format!("must: requirement `{module}` with exactly this version `{version}` is present in go.mod")
}

pub fn requirement_not_used(module: &str) -> String {
    format!("must: requirement `{module}` not used")
}

pub fn go_version_too_old(min_version: &str) -> String {
    format!("must: golang version at least `{min_version}`")
}
