//! Use case orchestration for repo-manager.
//!
//! This crate provides the application layer: use cases that coordinate the
//! settings, domain, repo, remote and render layers. The CLI crate depends on
//! this; it only handles argument parsing and process I/O.

#![forbid(unsafe_code)]

mod check;
mod explain;
mod render;
mod report;

pub use check::{
    CheckInput, CheckOutput, EXIT_ERROR, RepoReport, git_resolver, read_spec, run_check,
    verdict_exit_code,
};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use render::{ReportFormat, render_report, write_text};
pub use report::{build_run_report, serialize_report, to_renderable};
