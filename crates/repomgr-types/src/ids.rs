//! Stable identifiers for rules, repository types and file locations.
//!
//! Rule names are the `rule:` values accepted in a spec file. They are part of
//! the user-facing contract and must never change spelling.

// Spec
pub const SPEC_VERSION_V1: &str = "1";
pub const DEFAULT_SPEC_FILENAME: &str = "repo-manager-rules.yml";

// Rules
pub const RULE_GO_DEP_MODULE_MIN_VERSION: &str = "go-dep-module-min-version";
pub const RULE_GO_DEP_HAS_NO_MODULE: &str = "go-dep-has-no-module";
pub const RULE_GO_VERSION: &str = "go-version";
pub const RULE_GO_DEP_HAS_MODULE: &str = "go-dep-has-module";
pub const RULE_GO_DEP_MODULE_EXACT_VERSION: &str = "go-dep-module-exact-version";

/// Sentinel accepted wherever a rule takes a module version: resolve the
/// highest tag of the module's remote repository at init time.
pub const VERSION_LATEST: &str = "latest";

// Repository types
pub const REPO_TYPE_GOLANG: &str = "golang";
pub const GO_MOD_FILENAME: &str = "go.mod";

// Remote access
pub const DEFAULT_PRIVATE_KEY: &str = "$HOME/.ssh/id_rsa";
pub const GIT_SSH_USER: &str = "git";

/// All rule names, in registry order.
pub fn all_rule_names() -> &'static [&'static str] {
    &[
        RULE_GO_DEP_MODULE_MIN_VERSION,
        RULE_GO_DEP_HAS_NO_MODULE,
        RULE_GO_VERSION,
        RULE_GO_DEP_HAS_MODULE,
        RULE_GO_DEP_MODULE_EXACT_VERSION,
    ]
}

/// All supported repository types.
pub fn all_repo_types() -> &'static [&'static str] {
    &[REPO_TYPE_GOLANG]
}
