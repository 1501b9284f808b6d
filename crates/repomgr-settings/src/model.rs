use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// `repo-manager-rules.yml` schema v1.
///
/// This is a *user-facing* model: unknown keys are ignored and every list may
/// be omitted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpecV1 {
    /// Spec format version. Only `1` is supported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<SpecVersion>,

    #[serde(default)]
    pub policies: Vec<PolicySpec>,

    #[serde(default)]
    pub repos: Vec<RepoSpec>,
}

/// `version` may be written as `"1"` or `1`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum SpecVersion {
    Number(u64),
    Text(String),
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecVersion::Number(n) => write!(f, "{n}"),
            SpecVersion::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PolicySpec {
    /// Identifier referenced from `repos[].policies`. Unique within the spec.
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Rules in evaluation order.
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RuleSpec {
    /// Rule name, e.g. `go-dep-module-min-version`.
    #[serde(default)]
    pub rule: String,

    /// Rule parameters. Keys are case-insensitive, values must be scalars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<BTreeMap<String, Option<ParamScalar>>>")]
    pub params: Option<serde_yaml::Mapping>,
}

/// Schema-only view of a param value.
#[derive(JsonSchema)]
#[serde(untagged)]
#[allow(dead_code)]
enum ParamScalar {
    Text(String),
    Number(f64),
    Bool(bool),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RepoSpec {
    /// Display name used in reports.
    #[serde(default)]
    pub name: String,

    /// Repository root, relative to the working directory or absolute.
    #[serde(default)]
    pub path: String,

    /// Repository type. Only `golang` is supported.
    #[serde(default, rename = "type")]
    pub repo_type: String,

    /// Policy IDs applied to this repository, in order.
    #[serde(default)]
    pub policies: Vec<String>,
}
