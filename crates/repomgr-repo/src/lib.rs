//! Repository adapters: resolve repository paths, read and parse manifests.
//!
//! This crate is allowed to do filesystem IO. It never touches the network.

#![forbid(unsafe_code)]

mod golang;
mod gomod;

use camino::{Utf8Path, Utf8PathBuf};
use repomgr_domain::model::Repo;
use repomgr_types::ids;
use thiserror::Error;

pub use gomod::{GoModError, parse_go_mod};

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    /// Parse arbitrary text as a `go.mod` file.
    ///
    /// Returns the number of requirements on success. **Never panics** on any input.
    pub fn parse_go_mod(text: &str) -> Result<usize, super::GoModError> {
        super::parse_go_mod(text).map(|file| file.requires.len())
    }
}

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("cannot resolve absolute path of `{path}`")]
    Path {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("repository path `{0}` is not valid UTF-8")]
    NonUtf8Path(String),

    #[error("cannot read `{path}`")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse `{path}`")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: GoModError,
    },

    #[error("unknown repo type: {0}")]
    UnknownRepoType(String),
}

/// Loader for one repository type.
pub type RepoLoader = fn(&Utf8Path) -> Result<Repo, RepoError>;

/// The loader registered for `repo_type`, if any.
pub fn loader_for(repo_type: &str) -> Option<RepoLoader> {
    match repo_type {
        ids::REPO_TYPE_GOLANG => Some(golang::load),
        _ => None,
    }
}

/// Load the repository at `path` with the loader for `repo_type`.
///
/// Relative paths are resolved against the current working directory.
pub fn load_repo(repo_type: &str, path: &Utf8Path) -> Result<Repo, RepoError> {
    let loader =
        loader_for(repo_type).ok_or_else(|| RepoError::UnknownRepoType(repo_type.to_string()))?;
    loader(path)
}

/// Absolute form of `path` without touching the filesystem beyond reading
/// the current directory. Symlinks are not resolved.
pub fn absolute_path(path: &Utf8Path) -> Result<Utf8PathBuf, RepoError> {
    let abs = std::path::absolute(path).map_err(|source| RepoError::Path {
        path: path.to_path_buf(),
        source,
    })?;
    Utf8PathBuf::from_path_buf(abs)
        .map_err(|p| RepoError::NonUtf8Path(p.to_string_lossy().into_owned()))
}
