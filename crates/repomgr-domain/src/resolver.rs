//! Seam between rule compilation and remote tag lookup.

use std::error::Error as StdError;
use thiserror::Error;

/// Resolves the `latest` version sentinel for a module.
///
/// Implementations may perform network I/O. They are only consulted while
/// rules are compiled, never during per-repository evaluation.
pub trait TagResolver {
    /// Highest semantic-version tag of `module`, in its original spelling.
    fn latest_tag(&self, module: &str) -> Result<String, ResolveError>;
}

#[derive(Debug, Error)]
#[error("cannot fetch last tag of `{module}`")]
pub struct ResolveError {
    pub module: String,
    #[source]
    pub source: Box<dyn StdError + Send + Sync + 'static>,
}

impl ResolveError {
    pub fn new(
        module: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync + 'static>>,
    ) -> Self {
        Self {
            module: module.into(),
            source: source.into(),
        }
    }
}

impl<T: TagResolver + ?Sized> TagResolver for &T {
    fn latest_tag(&self, module: &str) -> Result<String, ResolveError> {
        (**self).latest_tag(module)
    }
}
