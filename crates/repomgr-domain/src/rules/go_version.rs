use super::{Rule, RuleError, RuleKind, messages};
use crate::params::{PARAM_MIN_VERSION, RuleParams};
use crate::resolver::TagResolver;
use crate::version::Version;

pub(super) fn build(params: &RuleParams, _resolver: &dyn TagResolver) -> Result<Rule, RuleError> {
    let min_version = Version::parse(params.require(PARAM_MIN_VERSION)?)?;
    Ok(go_version_rule(min_version))
}

/// Warn when the `go` directive is missing, unparsable, or below `min_version`.
pub fn go_version_rule(min_version: Version) -> Rule {
    let warn_too_old = messages::go_version_too_old(min_version.original());

    Rule::new(RuleKind::GoVersion, move |repo| {
        let actual = repo
            .go_mod
            .go
            .as_deref()
            .and_then(|v| Version::parse(v).ok());

        match actual {
            Some(actual) if actual >= min_version => Vec::new(),
            _ => vec![warn_too_old.clone()],
        }
    })
}
