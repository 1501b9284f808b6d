//! Remote tag resolution for the `latest` version sentinel.
//!
//! A module path `<host>/<path>` maps to the SSH remote `git@<host>:<path>.git`.
//! The remote's tags are listed without cloning and the highest semantic
//! version wins.

#![forbid(unsafe_code)]

mod git;
mod tags;

use camino::Utf8PathBuf;
use thiserror::Error;

pub use git::GitTagResolver;
pub use tags::{module_to_git_addr, select_latest, tag_names};

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("cannot derive git address from module `{module}`: expected <host>/<path>")]
    Address { module: String },

    #[error("cannot use private key `{path}`")]
    PrivateKey {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot authenticate to `{address}`")]
    Auth {
        address: String,
        #[source]
        source: git2::Error,
    },

    #[error("cannot list tags of `{address}`")]
    Network {
        address: String,
        #[source]
        source: git2::Error,
    },

    #[error("listing tags of `{address}` timed out after {secs}s")]
    Timeout { address: String, secs: u64 },

    #[error("tag listing for `{address}` stopped unexpectedly")]
    Worker { address: String },

    #[error("no semantic version tags found for `{module}`")]
    NoVersion { module: String },
}
