use crate::engine::RepoTarget;
use crate::model::{GoModFile, ModuleDecl, Repo, Require};
use crate::params::RuleParams;
use crate::policy::RuleConfig;
use crate::resolver::{ResolveError, TagResolver};
use camino::Utf8PathBuf;
use std::cell::Cell;
use std::collections::BTreeMap;

pub fn require(path: &str, version: &str) -> Require {
    Require {
        path: path.to_string(),
        version: version.to_string(),
        indirect: false,
        line: 1,
    }
}

pub fn go_repo(go: Option<&str>, requires: Vec<Require>) -> Repo {
    Repo {
        abs_path: Utf8PathBuf::from("/work/svc"),
        manifest_path: Utf8PathBuf::from("/work/svc/go.mod"),
        go_mod: GoModFile {
            module: Some(ModuleDecl {
                path: "example.com/svc".to_string(),
                deprecated: None,
                line: 1,
            }),
            go: go.map(str::to_string),
            requires,
            ..GoModFile::default()
        },
    }
}

pub fn target(name: &str, policies: &[&str]) -> RepoTarget {
    RepoTarget {
        name: name.to_string(),
        path: Utf8PathBuf::from(name),
        repo_type: "golang".to_string(),
        policies: policies.iter().map(|p| p.to_string()).collect(),
    }
}

pub fn params(pairs: &[(&str, &str)]) -> RuleParams {
    pairs.iter().copied().collect()
}

pub fn rule_config(rule: &str, pairs: &[(&str, &str)]) -> RuleConfig {
    RuleConfig {
        rule: rule.to_string(),
        params: params(pairs),
    }
}

/// Resolver for rules that must never touch the network.
pub struct NoRemote;

impl TagResolver for NoRemote {
    fn latest_tag(&self, module: &str) -> Result<String, ResolveError> {
        Err(ResolveError::new(module, "remote access disabled in tests"))
    }
}

/// Resolver answering from a fixed module -> tag map and counting lookups.
#[derive(Default)]
pub struct StaticTags {
    pub tags: BTreeMap<String, String>,
    pub calls: Cell<usize>,
}

impl StaticTags {
    pub fn with(module: &str, tag: &str) -> Self {
        let mut tags = BTreeMap::new();
        tags.insert(module.to_string(), tag.to_string());
        Self {
            tags,
            calls: Cell::new(0),
        }
    }
}

impl TagResolver for StaticTags {
    fn latest_tag(&self, module: &str) -> Result<String, ResolveError> {
        self.calls.set(self.calls.get() + 1);
        self.tags
            .get(module)
            .cloned()
            .ok_or_else(|| ResolveError::new(module, "no tags known"))
    }
}
