use super::{Rule, RuleError, RuleKind, messages};
use crate::params::{PARAM_MODULE, RuleParams};
use crate::resolver::TagResolver;

pub(super) fn build(params: &RuleParams, _resolver: &dyn TagResolver) -> Result<Rule, RuleError> {
    Ok(no_module_rule(params.require(PARAM_MODULE)?))
}

/// Warn when `module` is required at all.
pub fn no_module_rule(module: &str) -> Rule {
    let module = module.to_string();
    let warn_not_used = messages::requirement_not_used(&module);

    Rule::new(RuleKind::GoDepHasNoModule, move |repo| {
        if repo.find_require(&module).is_some() {
            return vec![warn_not_used.clone()];
        }
        Vec::new()
    })
}
