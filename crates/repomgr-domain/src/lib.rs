//! Pure rule evaluation (no IO).
//!
//! Input: parsed repositories and compiled policies.
//! Output: ordered warning strings per repository.
//!
//! The only side effect a rule may have happens while it is being compiled:
//! the `latest` version sentinel is resolved through a [`TagResolver`]
//! supplied by the caller.

#![forbid(unsafe_code)]

pub mod engine;
pub mod fingerprint;
pub mod model;
pub mod params;
pub mod policy;
pub mod resolver;
pub mod rules;
pub mod version;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::{EvalError, RepoTarget, evaluate_repo};
pub use policy::{Policy, PolicyConfig, PolicyError, PolicySet, RuleConfig};
pub use resolver::{ResolveError, TagResolver};
pub use rules::{Rule, RuleError, RuleKind, compile_rule};
pub use version::{Version, VersionError};
