use crate::model::Repo;
use crate::policy::PolicySet;
use camino::Utf8PathBuf;
use thiserror::Error;

/// One `repos[]` entry: which repository to load and which policies to apply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoTarget {
    pub name: String,
    pub path: Utf8PathBuf,
    pub repo_type: String,
    pub policies: Vec<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("unknown policy: {policy} (referenced by repo `{repo}`)")]
    UnknownPolicy { repo: String, policy: String },
}

/// Run the target's policies against a loaded repository.
///
/// Warnings keep policy-then-rule declaration order. A policy ID with no
/// compiled policy is fatal.
pub fn evaluate_repo(
    target: &RepoTarget,
    repo: &Repo,
    policies: &PolicySet,
) -> Result<Vec<String>, EvalError> {
    let mut warnings = Vec::new();
    for policy_id in &target.policies {
        let policy = policies
            .get(policy_id)
            .ok_or_else(|| EvalError::UnknownPolicy {
                repo: target.name.clone(),
                policy: policy_id.clone(),
            })?;
        warnings.extend(policy.evaluate(repo));
    }
    Ok(warnings)
}
