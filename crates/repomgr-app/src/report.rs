use crate::check::RepoReport;
use anyhow::Context;
use repomgr_domain::fingerprint::fingerprint_for_warning;
use repomgr_render::{RenderableRepo, RenderableReport};
use repomgr_types::{
    RepoResult, RunReport, SCHEMA_REPORT_V1, ToolMeta, Verdict, WarningEntry,
};
use time::OffsetDateTime;

pub fn build_run_report(
    repos: &[RepoReport],
    started_at: OffsetDateTime,
    finished_at: OffsetDateTime,
) -> RunReport {
    let repos: Vec<RepoResult> = repos.iter().map(repo_result).collect();
    let total: usize = repos.iter().map(|r| r.warnings.len()).sum();

    RunReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "repo-manager".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at,
        verdict: Verdict::from_warning_count(total),
        warnings_total: u32::try_from(total).unwrap_or(u32::MAX),
        repos,
    }
}

fn repo_result(report: &RepoReport) -> RepoResult {
    RepoResult {
        name: report.target.name.clone(),
        path: report.repo.abs_path.to_string(),
        repo_type: report.target.repo_type.clone(),
        warnings: report
            .warnings
            .iter()
            .map(|message| WarningEntry {
                message: message.clone(),
                fingerprint: fingerprint_for_warning(&report.target.name, message),
            })
            .collect(),
    }
}

pub fn serialize_report(report: &RunReport) -> anyhow::Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(report).context("serialize run report")?;
    bytes.push(b'\n');
    Ok(bytes)
}

pub fn to_renderable(report: &RunReport) -> RenderableReport {
    RenderableReport {
        verdict: report.verdict,
        repos: report
            .repos
            .iter()
            .map(|repo| RenderableRepo {
                name: repo.name.clone(),
                warnings: repo.warnings.iter().map(|w| w.message.clone()).collect(),
            })
            .collect(),
    }
}
