//! Shared test utilities for the repo-manager workspace.
//!
//! This crate exists because integration tests in several crates need the
//! same temp-repository builders and report normalization, which a
//! `#[cfg(test)]` module inside one crate cannot provide.

use camino::{Utf8Path, Utf8PathBuf};
use repomgr_domain::{ResolveError, TagResolver};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use tempfile::TempDir;

/// A temporary directory holding Go repositories and spec files.
pub struct TempRepos {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl TempRepos {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8 temp path");
        Self { _dir: dir, root }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Write `<root>/<rel>` creating parent directories, and return its path.
    pub fn write(&self, rel: &str, contents: &str) -> Utf8PathBuf {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(&path, contents).expect("write file");
        path
    }

    /// Write `<root>/<repo>/go.mod` and return the repository directory.
    pub fn go_mod(&self, repo: &str, contents: &str) -> Utf8PathBuf {
        self.write(&format!("{repo}/go.mod"), contents);
        self.root.join(repo)
    }
}

impl Default for TempRepos {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimal go.mod text with the given `go` directive and requirements.
pub fn go_mod_text(module: &str, go: Option<&str>, requires: &[(&str, &str)]) -> String {
    let mut out = format!("module {module}\n");
    if let Some(go) = go {
        out.push_str(&format!("\ngo {go}\n"));
    }
    if !requires.is_empty() {
        out.push_str("\nrequire (\n");
        for (path, version) in requires {
            out.push_str(&format!("\t{path} {version}\n"));
        }
        out.push_str(")\n");
    }
    out
}

/// Resolver that fails every lookup, for runs that must stay offline.
pub struct NoRemote;

impl TagResolver for NoRemote {
    fn latest_tag(&self, module: &str) -> Result<String, ResolveError> {
        Err(ResolveError::new(module, "remote access disabled in tests"))
    }
}

/// Resolver answering from a fixed module -> tag map and recording lookups.
#[derive(Default)]
pub struct StaticTagResolver {
    tags: BTreeMap<String, String>,
    lookups: RefCell<Vec<String>>,
}

impl StaticTagResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, module: &str, tag: &str) -> Self {
        self.tags.insert(module.to_string(), tag.to_string());
        self
    }

    /// Modules looked up so far, in call order.
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.borrow().clone()
    }
}

impl TagResolver for StaticTagResolver {
    fn latest_tag(&self, module: &str) -> Result<String, ResolveError> {
        self.lookups.borrow_mut().push(module.to_string());
        self.tags
            .get(module)
            .cloned()
            .ok_or_else(|| ResolveError::new(module, "no tags known"))
    }
}

/// Normalize non-deterministic JSON fields of a run report for golden-file
/// comparison.
///
/// `tool.version` is replaced only when the root object looks like a run
/// report. Timestamps are replaced at any depth. Occurrences of `root` at the
/// start of string values become `__ROOT__`.
pub fn normalize_nondeterministic(mut value: Value, root: Option<&Utf8Path>) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_report = obj.contains_key("schema")
            && obj.contains_key("tool")
            && obj.contains_key("verdict")
            && obj.contains_key("repos");
        if is_report
            && let Some(tool) = obj.get_mut("tool").and_then(Value::as_object_mut)
            && tool.contains_key("version")
        {
            tool.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
    }
    normalize_recursive(&mut value, root.map(Utf8Path::as_str));
    value
}

fn normalize_recursive(value: &mut Value, root: Option<&str>) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "finished_at"] {
                if map.contains_key(key) {
                    map.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
                }
            }
            for val in map.values_mut() {
                normalize_recursive(val, root);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_recursive(val, root);
            }
        }
        Value::String(s) => {
            if let Some(rest) = root.and_then(|r| s.strip_prefix(r)) {
                *s = format!("__ROOT__{rest}");
            }
        }
        _ => {}
    }
}
