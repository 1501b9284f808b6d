//! Rule kinds, the constructor registry, and the compiled [`Rule`] value.
//!
//! Compiling a rule is the only step that may fail or perform I/O (through
//! the [`TagResolver`]). Evaluating a compiled rule is pure.

use crate::model::Repo;
use crate::params::{ParamError, RuleParams};
use crate::policy::RuleConfig;
use crate::resolver::{ResolveError, TagResolver};
use crate::version::{Version, VersionError};
use repomgr_types::ids;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

mod exact_version;
mod go_version;
mod has_module;
pub mod messages;
mod min_version;
mod no_module;


pub use exact_version::exact_version_rule;
pub use go_version::go_version_rule;
pub use has_module::has_module_rule;
pub use min_version::min_version_rule;
pub use no_module::no_module_rule;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("unknown rule: {0}")]
    UnknownRule(String),
    #[error("cannot parse rule params: {0}")]
    Params(#[from] ParamError),
    #[error("bad version format: {0}")]
    Version(#[from] VersionError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleKind {
    GoDepModuleMinVersion,
    GoDepHasNoModule,
    GoVersion,
    GoDepHasModule,
    GoDepModuleExactVersion,
}

impl RuleKind {
    pub const ALL: [RuleKind; 5] = [
        RuleKind::GoDepModuleMinVersion,
        RuleKind::GoDepHasNoModule,
        RuleKind::GoVersion,
        RuleKind::GoDepHasModule,
        RuleKind::GoDepModuleExactVersion,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::GoDepModuleMinVersion => ids::RULE_GO_DEP_MODULE_MIN_VERSION,
            RuleKind::GoDepHasNoModule => ids::RULE_GO_DEP_HAS_NO_MODULE,
            RuleKind::GoVersion => ids::RULE_GO_VERSION,
            RuleKind::GoDepHasModule => ids::RULE_GO_DEP_HAS_MODULE,
            RuleKind::GoDepModuleExactVersion => ids::RULE_GO_DEP_MODULE_EXACT_VERSION,
        }
    }
}

impl FromStr for RuleKind {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| RuleError::UnknownRule(s.to_string()))
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Check = dyn Fn(&Repo) -> Vec<String> + Send + Sync;

/// A compiled rule: a pure function from a repository to its warnings.
pub struct Rule {
    kind: RuleKind,
    check: Box<Check>,
}

impl Rule {
    pub fn new<F>(kind: RuleKind, check: F) -> Self
    where
        F: Fn(&Repo) -> Vec<String> + Send + Sync + 'static,
    {
        Self {
            kind,
            check: Box::new(check),
        }
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn evaluate(&self, repo: &Repo) -> Vec<String> {
        (self.check)(repo)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("kind", &self.kind).finish()
    }
}

pub type RuleConstructor = fn(&RuleParams, &dyn TagResolver) -> Result<Rule, RuleError>;

/// Constructor registered for `kind`.
pub fn constructor(kind: RuleKind) -> RuleConstructor {
    match kind {
        RuleKind::GoDepModuleMinVersion => min_version::build,
        RuleKind::GoDepHasNoModule => no_module::build,
        RuleKind::GoVersion => go_version::build,
        RuleKind::GoDepHasModule => has_module::build,
        RuleKind::GoDepModuleExactVersion => exact_version::build,
    }
}

/// Compile one rule from its spec entry.
pub fn compile_rule(config: &RuleConfig, resolver: &dyn TagResolver) -> Result<Rule, RuleError> {
    let kind: RuleKind = config.rule.parse()?;
    constructor(kind)(&config.params, resolver)
}

/// Parse a module version param, resolving the `latest` sentinel remotely.
fn resolve_module_version(
    module: &str,
    raw: &str,
    resolver: &dyn TagResolver,
) -> Result<Version, RuleError> {
    if raw == ids::VERSION_LATEST {
        let tag = resolver.latest_tag(module)?;
        return Ok(Version::parse(&tag)?);
    }
    Ok(Version::parse(raw)?)
}
