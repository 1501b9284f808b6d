use crate::Verdict;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for the JSON run report.
pub const SCHEMA_REPORT_V1: &str = "repo-manager.report.v1";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Machine-readable result of one `run`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RunReport {
    pub schema: String,
    pub tool: ToolMeta,

    #[serde(with = "time::serde::rfc3339")]
    #[schemars(with = "String")]
    pub started_at: OffsetDateTime,

    #[serde(with = "time::serde::rfc3339")]
    #[schemars(with = "String")]
    pub finished_at: OffsetDateTime,

    pub verdict: Verdict,
    pub warnings_total: u32,

    /// Repositories in spec order.
    pub repos: Vec<RepoResult>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RepoResult {
    pub name: String,
    /// Absolute repository path.
    pub path: String,
    #[serde(rename = "type")]
    pub repo_type: String,
    /// Warnings in policy-then-rule order.
    pub warnings: Vec<WarningEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WarningEntry {
    pub message: String,
    /// Hex SHA-256 of repository name and message; stable across runs.
    pub fingerprint: String,
}

impl RunReport {
    pub fn warnings(&self) -> impl Iterator<Item = (&RepoResult, &WarningEntry)> {
        self.repos
            .iter()
            .flat_map(|repo| repo.warnings.iter().map(move |w| (repo, w)))
    }
}
