use super::{Rule, RuleError, RuleKind, messages};
use crate::params::{PARAM_MODULE, RuleParams};
use crate::resolver::TagResolver;

pub(super) fn build(params: &RuleParams, _resolver: &dyn TagResolver) -> Result<Rule, RuleError> {
    Ok(has_module_rule(params.require(PARAM_MODULE)?))
}

/// Warn when `module` is not required.
pub fn has_module_rule(module: &str) -> Rule {
    let module = module.to_string();
    let warn_present = messages::requirement_present(&module);

    Rule::new(RuleKind::GoDepHasModule, move |repo| {
        if repo.find_require(&module).is_none() {
            return vec![warn_present.clone()];
        }
        Vec::new()
    })
}
