use crate::model::{PolicySpec, RepoSpec, RuleSpec, SpecV1};
use camino::Utf8PathBuf;
use repomgr_domain::params::RuleParams;
use repomgr_domain::{PolicyConfig, RepoTarget, RuleConfig};
use repomgr_types::ids;
use serde_yaml::Value;
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("cannot unmarshal spec")]
    Parse(#[from] serde_yaml::Error),

    #[error("unknown spec version `{found}` (supported: {supported})", supported = ids::SPEC_VERSION_V1)]
    Version { found: String },

    #[error("invalid params for rule `{rule}` in policy `{policy}`: {reason}")]
    Config {
        policy: String,
        rule: String,
        reason: String,
    },

    #[error("duplicate policy id `{0}`")]
    DuplicatePolicy(String),
}

/// A validated spec, converted into the inputs of the evaluation engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSpec {
    /// Policies in declaration order.
    pub policies: Vec<PolicyConfig>,
    /// Repositories in declaration order.
    pub repos: Vec<RepoTarget>,
}

pub fn resolve_spec(spec: SpecV1) -> Result<ResolvedSpec, SpecError> {
    check_version(&spec)?;

    let mut seen = BTreeSet::new();
    let mut policies = Vec::with_capacity(spec.policies.len());
    for policy in spec.policies {
        if !seen.insert(policy.id.clone()) {
            return Err(SpecError::DuplicatePolicy(policy.id));
        }
        policies.push(resolve_policy(policy)?);
    }

    let repos = spec.repos.into_iter().map(resolve_repo).collect();

    Ok(ResolvedSpec { policies, repos })
}

fn check_version(spec: &SpecV1) -> Result<(), SpecError> {
    let found = spec
        .version
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    if found != ids::SPEC_VERSION_V1 {
        return Err(SpecError::Version { found });
    }
    Ok(())
}

fn resolve_policy(policy: PolicySpec) -> Result<PolicyConfig, SpecError> {
    let mut rules = Vec::with_capacity(policy.rules.len());
    for rule in policy.rules {
        rules.push(resolve_rule(&policy.id, rule)?);
    }
    Ok(PolicyConfig {
        id: policy.id,
        name: policy.name,
        rules,
    })
}

fn resolve_rule(policy_id: &str, rule: RuleSpec) -> Result<RuleConfig, SpecError> {
    let params = match &rule.params {
        None => RuleParams::new(),
        Some(mapping) => decode_params(mapping).map_err(|reason| SpecError::Config {
            policy: policy_id.to_string(),
            rule: rule.rule.clone(),
            reason,
        })?,
    };
    Ok(RuleConfig {
        rule: rule.rule,
        params,
    })
}

fn resolve_repo(repo: RepoSpec) -> RepoTarget {
    RepoTarget {
        name: repo.name,
        path: Utf8PathBuf::from(repo.path),
        repo_type: repo.repo_type,
        policies: repo.policies,
    }
}

/// Weakly decode a YAML mapping into string params.
///
/// Scalar keys and values are stringified; null becomes an empty string.
/// Sequences, mappings and tagged values are rejected.
pub fn decode_params(mapping: &serde_yaml::Mapping) -> Result<RuleParams, String> {
    let mut params = RuleParams::new();
    for (key, value) in mapping {
        let key = scalar_to_string(key).ok_or_else(|| "param names must be scalars".to_string())?;
        let value = scalar_to_string(value)
            .ok_or_else(|| format!("param `{key}` must be a scalar value"))?;
        if params.get(&key).is_some() {
            return Err(format!("param `{key}` given more than once"));
        }
        params.insert(key, value);
    }
    Ok(params)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SpecVersion;

    fn mapping(yaml: &str) -> serde_yaml::Mapping {
        serde_yaml::from_str(yaml).expect("mapping")
    }

    #[test]
    fn decode_stringifies_scalars() {
        let params = decode_params(&mapping("module: github.com/a/b\nminVersion: 2\nflag: true\nempty: ~\n"))
            .expect("decode");
        assert_eq!(params.get("module"), Some("github.com/a/b"));
        assert_eq!(params.get("minversion"), Some("2"));
        assert_eq!(params.get("flag"), Some("true"));
        assert_eq!(params.get("empty"), Some(""));
    }

    #[test]
    fn decode_rejects_nested_values() {
        let err = decode_params(&mapping("module:\n  - a\n  - b\n")).unwrap_err();
        assert_eq!(err, "param `module` must be a scalar value");
    }

    #[test]
    fn decode_rejects_case_insensitive_duplicates() {
        let err = decode_params(&mapping("minVersion: v1\nminversion: v2\n")).unwrap_err();
        assert!(err.contains("more than once"), "{err}");
    }

    #[test]
    fn version_accepts_number_or_string() {
        for version in [SpecVersion::Number(1), SpecVersion::Text("1".to_string())] {
            let spec = SpecV1 {
                version: Some(version),
                ..SpecV1::default()
            };
            assert!(resolve_spec(spec).is_ok());
        }
    }

    #[test]
    fn missing_version_is_rejected() {
        let err = resolve_spec(SpecV1::default()).unwrap_err();
        assert!(matches!(err, SpecError::Version { ref found } if found.is_empty()));
    }
}
