use crate::RemoteError;
use crate::tags::{module_to_git_addr, select_latest, tag_names};
use camino::{Utf8Path, Utf8PathBuf};
use git2::{CertificateCheckStatus, Cred, Direction, ErrorClass, ErrorCode, Remote, RemoteCallbacks};
use repomgr_domain::{ResolveError, TagResolver};
use repomgr_types::ids;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Resolves `latest` by listing the tags of a module's git remote over SSH.
///
/// The remote host key is NOT verified: any key is accepted. Only the ref
/// advertisement is read, so no objects are downloaded or stored.
#[derive(Clone, Debug)]
pub struct GitTagResolver {
    private_key: Utf8PathBuf,
    timeout: Option<Duration>,
}

impl GitTagResolver {
    /// `timeout` bounds each tag listing; `None` waits for git indefinitely.
    ///
    /// A timed-out listing is abandoned, not cancelled: its worker thread and
    /// SSH connection stay alive until git gives up or the process exits.
    pub fn new(private_key: impl Into<Utf8PathBuf>, timeout: Option<Duration>) -> Self {
        Self {
            private_key: private_key.into(),
            timeout,
        }
    }

    pub fn private_key(&self) -> &Utf8Path {
        &self.private_key
    }

    /// Highest semantic-version tag of `module`'s remote repository.
    pub fn fetch_last_tag(&self, module: &str) -> Result<String, RemoteError> {
        let address = module_to_git_addr(module)?;

        std::fs::metadata(&self.private_key).map_err(|source| RemoteError::PrivateKey {
            path: self.private_key.clone(),
            source,
        })?;

        info!(%module, %address, "listing remote tags");
        let refs = self.list_refs_with_timeout(&address)?;
        let tags = tag_names(refs.iter().map(String::as_str));
        debug!(%address, tags = tags.len(), "remote tags listed");

        let latest = select_latest(module, &tags)?;
        info!(%module, %latest, "resolved latest version");
        Ok(latest)
    }

    fn list_refs_with_timeout(&self, address: &str) -> Result<Vec<String>, RemoteError> {
        let Some(timeout) = self.timeout else {
            return list_refs(address, &self.private_key);
        };

        let (tx, rx) = mpsc::channel();
        let worker_address = address.to_string();
        let key = self.private_key.clone();
        thread::spawn(move || {
            // The receiver is gone once the caller has timed out.
            let _ = tx.send(list_refs(&worker_address, &key));
        });

        match rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(RemoteError::Timeout {
                address: address.to_string(),
                secs: timeout.as_secs(),
            }),
            Err(RecvTimeoutError::Disconnected) => Err(RemoteError::Worker {
                address: address.to_string(),
            }),
        }
    }
}

impl TagResolver for GitTagResolver {
    fn latest_tag(&self, module: &str) -> Result<String, ResolveError> {
        self.fetch_last_tag(module)
            .map_err(|err| ResolveError::new(module, err))
    }
}

/// Connect to `address` and return the advertised ref names.
fn list_refs(address: &str, private_key: &Utf8Path) -> Result<Vec<String>, RemoteError> {
    let mut remote = Remote::create_detached(address).map_err(|source| RemoteError::Network {
        address: address.to_string(),
        source,
    })?;

    let mut attempts = 0u32;
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(move |_url, username, _allowed| {
        attempts += 1;
        if attempts > 1 {
            return Err(git2::Error::new(
                ErrorCode::Auth,
                ErrorClass::Ssh,
                "private key was rejected",
            ));
        }
        Cred::ssh_key(
            username.unwrap_or(ids::GIT_SSH_USER),
            None,
            private_key.as_std_path(),
            None,
        )
    });
    callbacks.certificate_check(|_cert, host| {
        warn!(%host, "accepting remote host key without verification");
        Ok(CertificateCheckStatus::CertificateOk)
    });

    let connection = remote
        .connect_auth(Direction::Fetch, Some(callbacks), None)
        .map_err(|source| classify(address, source))?;
    let refs: Vec<String> = connection
        .list()
        .map_err(|source| classify(address, source))?
        .iter()
        .map(|head| head.name().to_string())
        .collect();
    Ok(refs)
}

fn classify(address: &str, source: git2::Error) -> RemoteError {
    let address = address.to_string();
    if source.code() == ErrorCode::Auth || source.class() == ErrorClass::Ssh {
        RemoteError::Auth { address, source }
    } else {
        RemoteError::Network { address, source }
    }
}
