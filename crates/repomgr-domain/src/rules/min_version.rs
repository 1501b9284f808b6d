use super::{Rule, RuleError, RuleKind, messages, resolve_module_version};
use crate::params::{PARAM_MIN_VERSION, PARAM_MODULE, RuleParams};
use crate::resolver::TagResolver;
use crate::version::Version;

pub(super) fn build(params: &RuleParams, resolver: &dyn TagResolver) -> Result<Rule, RuleError> {
    let module = params.require(PARAM_MODULE)?;
    let min_version =
        resolve_module_version(module, params.require(PARAM_MIN_VERSION)?, resolver)?;
    Ok(min_version_rule(module, min_version))
}

/// Warn unless `module` is required at `min_version` or higher.
pub fn min_version_rule(module: &str, min_version: Version) -> Rule {
    let module = module.to_string();
    let warn_present = messages::requirement_present(&module);
    let warn_at_least = messages::requirement_at_least(&module, min_version.original());

    Rule::new(RuleKind::GoDepModuleMinVersion, move |repo| {
        let Some(require) = repo.find_require(&module) else {
            return vec![warn_present.clone()];
        };

        match Version::parse(&require.version) {
            Ok(actual) if actual >= min_version => Vec::new(),
            _ => vec![warn_at_least.clone()],
        }
    })
}
