use super::{Rule, RuleError, RuleKind, messages, resolve_module_version};
use crate::params::{PARAM_MODULE, PARAM_VERSION, RuleParams};
use crate::resolver::TagResolver;
use crate::version::Version;

pub(super) fn build(params: &RuleParams, resolver: &dyn TagResolver) -> Result<Rule, RuleError> {
    let module = params.require(PARAM_MODULE)?;
    let version = resolve_module_version(module, params.require(PARAM_VERSION)?, resolver)?;
    Ok(exact_version_rule(module, version))
}

/// Warn unless `module` is required at a version of equal precedence.
pub fn exact_version_rule(module: &str, version: Version) -> Rule {
    let module = module.to_string();
    let warn_present = messages::requirement_present(&module);
    let warn_exactly = messages::requirement_exactly(&module, version.original());

    Rule::new(RuleKind::GoDepModuleExactVersion, move |repo| {
        let Some(require) = repo.find_require(&module) else {
            return vec![warn_present.clone()];
        };

        match Version::parse(&require.version) {
            Ok(actual) if actual == version => Vec::new(),
            _ => vec![warn_exactly.clone()],
        }
    })
}
