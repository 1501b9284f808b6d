//! The `run` use case: compile policies, evaluate every repository, build a report.

use crate::report::build_run_report;
use anyhow::Context;
use camino::Utf8Path;
use repomgr_domain::model::Repo;
use repomgr_domain::{PolicySet, RepoTarget, TagResolver, evaluate_repo};
use repomgr_remote::GitTagResolver;
use repomgr_settings::RunOptions;
use repomgr_types::{RunReport, Verdict};
use time::OffsetDateTime;
use tracing::{debug, info};

/// Exit code for operational errors (bad spec, unreadable manifest, remote failure).
pub const EXIT_ERROR: i32 = 2;

/// Input for the run use case.
pub struct CheckInput<'a> {
    /// Spec file contents.
    pub spec_text: &'a str,
    /// Resolver for the `latest` version sentinel.
    pub resolver: &'a dyn TagResolver,
}

/// One evaluated repository.
#[derive(Clone, Debug)]
pub struct RepoReport {
    pub target: RepoTarget,
    pub repo: Repo,
    pub warnings: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct CheckOutput {
    /// Per-repository results in spec order.
    pub repos: Vec<RepoReport>,
    pub report: RunReport,
}

impl CheckOutput {
    pub fn verdict(&self) -> Verdict {
        self.report.verdict
    }
}

/// Read the spec file at `path`.
pub fn read_spec(path: &Utf8Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("cannot read spec file `{path}`"))
}

/// Resolver backed by the remote git server of each module.
pub fn git_resolver(options: &RunOptions) -> GitTagResolver {
    GitTagResolver::new(options.private_key_path(), options.network_timeout())
}

/// Run every assigned policy against every repository in the spec.
///
/// Policies are compiled first; any failure there aborts before a repository
/// is read. Repositories are then evaluated in spec order and the first
/// loading or evaluation error aborts the run.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    let spec = repomgr_settings::load_spec_str(input.spec_text).context("cannot load spec")?;

    info!(policies = spec.policies.len(), "compiling policies");
    let policies =
        PolicySet::compile(&spec.policies, input.resolver).context("cannot init repo manager")?;

    info!(repos = spec.repos.len(), "evaluating repositories");
    let mut repos = Vec::with_capacity(spec.repos.len());
    for target in spec.repos {
        let report = evaluate_target(target, &policies)?;
        repos.push(report);
    }

    let finished_at = OffsetDateTime::now_utc();
    let report = build_run_report(&repos, started_at, finished_at);
    info!(
        verdict = report.verdict.as_str(),
        warnings = report.warnings_total,
        "run finished"
    );

    Ok(CheckOutput { repos, report })
}

fn evaluate_target(target: RepoTarget, policies: &PolicySet) -> anyhow::Result<RepoReport> {
    debug!(repo = %target.name, path = %target.path, repo_type = %target.repo_type, "loading repository");
    let repo = repomgr_repo::load_repo(&target.repo_type, &target.path)
        .with_context(|| format!("cannot load repo `{}`", target.name))?;

    let warnings = evaluate_repo(&target, &repo, policies)
        .with_context(|| format!("cannot evaluate repo `{}`", target.name))?;
    debug!(repo = %target.name, warnings = warnings.len(), "repository evaluated");

    Ok(RepoReport {
        target,
        repo,
        warnings,
    })
}

/// Exit code for a completed run: `0` without warnings, `1` with warnings.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Fail => 1,
    }
}
