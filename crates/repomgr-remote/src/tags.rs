use crate::RemoteError;
use repomgr_domain::Version;
use std::collections::BTreeSet;

const TAG_PREFIX: &str = "refs/tags/";
const PEELED_SUFFIX: &str = "^{}";

/// Derive `git@<host>:<path>.git` from a module path `<host>/<path>`.
pub fn module_to_git_addr(module: &str) -> Result<String, RemoteError> {
    match module.split_once('/') {
        Some((host, path)) if !host.is_empty() && !path.is_empty() => {
            Ok(format!("git@{host}:{path}.git"))
        }
        _ => Err(RemoteError::Address {
            module: module.to_string(),
        }),
    }
}

/// Tag names from advertised ref names. Peeled entries are folded into their
/// tag and non-tag refs are dropped.
pub fn tag_names<'a, I>(refs: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let names: BTreeSet<&str> = refs
        .into_iter()
        .filter_map(|name| name.strip_prefix(TAG_PREFIX))
        .map(|tag| tag.strip_suffix(PEELED_SUFFIX).unwrap_or(tag))
        .filter(|tag| !tag.is_empty())
        .collect();
    names.into_iter().map(str::to_string).collect()
}

/// Highest semantic version among `tags`, in its original spelling.
///
/// Tags that are not semantic versions are skipped.
pub fn select_latest<I, S>(module: &str, tags: I) -> Result<String, RemoteError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .filter_map(|tag| Version::parse(tag.as_ref()).ok())
        .max()
        .map(|version| version.original().to_string())
        .ok_or_else(|| RemoteError::NoVersion {
            module: module.to_string(),
        })
}
