//! Spec parsing and resolution.
//!
//! This crate is IO-free apart from reading environment variables for path
//! expansion: the spec is provided as a string.

#![forbid(unsafe_code)]

mod model;
mod options;
mod resolve;

pub use model::{PolicySpec, RepoSpec, RuleSpec, SpecV1, SpecVersion};
pub use options::{DEFAULT_NETWORK_TIMEOUT_SECS, RunOptions, expand_env, expand_env_with};
pub use resolve::{ResolvedSpec, SpecError, decode_params, resolve_spec};

/// Parse a spec document into its typed model without validating it.
pub fn parse_spec_yaml(input: &str) -> Result<SpecV1, SpecError> {
    let spec: SpecV1 = serde_yaml::from_str(input)?;
    Ok(spec)
}

/// Parse, validate and resolve a spec document.
pub fn load_spec_str(input: &str) -> Result<ResolvedSpec, SpecError> {
    resolve_spec(parse_spec_yaml(input)?)
}
