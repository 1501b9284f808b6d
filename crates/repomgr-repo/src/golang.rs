use crate::gomod::parse_go_mod;
use crate::{RepoError, absolute_path};
use camino::Utf8Path;
use repomgr_domain::model::Repo;
use repomgr_types::ids;
use tracing::debug;

/// Load a Go module repository: `<path>/go.mod` must exist and parse.
pub(crate) fn load(path: &Utf8Path) -> Result<Repo, RepoError> {
    let abs_path = absolute_path(path)?;
    let manifest_path = abs_path.join(ids::GO_MOD_FILENAME);

    debug!(repo = %abs_path, manifest = %manifest_path, "reading go.mod");
    let text = std::fs::read_to_string(&manifest_path).map_err(|source| RepoError::Read {
        path: manifest_path.clone(),
        source,
    })?;

    let go_mod = parse_go_mod(&text).map_err(|source| RepoError::Parse {
        path: manifest_path.clone(),
        source,
    })?;
    debug!(
        module = go_mod.module_path().unwrap_or("<none>"),
        requires = go_mod.requires.len(),
        "parsed go.mod"
    );

    Ok(Repo {
        abs_path,
        manifest_path,
        go_mod,
    })
}
