//! Stable DTOs and IDs used across the repo-manager workspace.
//!
//! This crate is intentionally boring:
//! - stable rule names, repo types and default filenames
//! - the run verdict and the machine-readable run report
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
mod report;
mod verdict;

pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use report::{RepoResult, RunReport, SCHEMA_REPORT_V1, ToolMeta, WarningEntry};
pub use verdict::Verdict;
