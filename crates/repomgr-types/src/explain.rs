//! Explain registry for rules.
//!
//! Maps rule names to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a rule.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the rule.
    pub title: &'static str,
    /// What the rule checks and when it warns.
    pub description: &'static str,
    /// Accepted `params` keys.
    pub params: &'static [(&'static str, &'static str)],
    /// How to fix warnings.
    pub remediation: &'static str,
    /// Before/after examples.
    pub examples: ExamplePair,
}

/// Before and after examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// A go.mod that would trigger a warning.
    pub before: &'static str,
    /// A go.mod that passes the rule.
    pub after: &'static str,
}

/// Look up an explanation by rule name.
///
/// Returns `None` if the rule name is not recognized.
pub fn lookup_explanation(rule: &str) -> Option<Explanation> {
    match rule {
        ids::RULE_GO_DEP_MODULE_MIN_VERSION => Some(explain_min_version()),
        ids::RULE_GO_DEP_HAS_NO_MODULE => Some(explain_has_no_module()),
        ids::RULE_GO_VERSION => Some(explain_go_version()),
        ids::RULE_GO_DEP_HAS_MODULE => Some(explain_has_module()),
        ids::RULE_GO_DEP_MODULE_EXACT_VERSION => Some(explain_exact_version()),
        _ => None,
    }
}

fn explain_min_version() -> Explanation {
    Explanation {
        title: "Minimum Module Version",
        description: "\
Requires the repository to depend on a module at or above a minimum version.

Warns when:
- the module is not required in go.mod at all
- the required version is not a valid semantic version
- the required version is lower than `minVersion`

`minVersion: latest` resolves the highest semver tag of the module's remote
repository once, before any repository is evaluated.",
        params: &[
            ("module", "module path, e.g. github.com/org/lib"),
            ("minVersion", "minimum version, or `latest`"),
        ],
        remediation: "\
Upgrade the dependency:
  go get github.com/org/lib@v1.4.0
  go mod tidy",
        examples: ExamplePair {
            before: r#"require github.com/org/lib v1.2.0"#,
            after: r#"require github.com/org/lib v1.4.0"#,
        },
    }
}

fn explain_has_no_module() -> Explanation {
    Explanation {
        title: "Banned Module",
        description: "\
Forbids a module from appearing in the repository's requirements.

Warns when go.mod requires `module`, directly or as `// indirect`.",
        params: &[("module", "module path that must not be used")],
        remediation: "\
Remove every import of the module, then drop it from go.mod:
  go mod tidy",
        examples: ExamplePair {
            before: r#"require (
	github.com/pkg/errors v0.9.1
)"#,
            after: r#"require (
	golang.org/x/sync v0.7.0
)"#,
        },
    }
}

fn explain_go_version() -> Explanation {
    Explanation {
        title: "Minimum Go Version",
        description: "\
Requires the `go` directive of go.mod to be at or above a minimum version.

Warns when the directive is missing, is not a valid version, or is lower
than `minVersion`.",
        params: &[("minVersion", "minimum language version, e.g. 1.21")],
        remediation: "\
Raise the language version:
  go mod edit -go=1.22",
        examples: ExamplePair {
            before: "go 1.19",
            after: "go 1.22",
        },
    }
}

fn explain_has_module() -> Explanation {
    Explanation {
        title: "Required Module",
        description: "\
Requires the repository to depend on a module, at any version.",
        params: &[("module", "module path that must be required")],
        remediation: "\
Add the dependency:
  go get github.com/org/lib",
        examples: ExamplePair {
            before: "require golang.org/x/sync v0.7.0",
            after: r#"require (
	github.com/org/lib v1.0.0
	golang.org/x/sync v0.7.0
)"#,
        },
    }
}

fn explain_exact_version() -> Explanation {
    Explanation {
        title: "Pinned Module Version",
        description: "\
Requires the repository to depend on a module at exactly one version.

Versions are compared by semantic-version precedence, so `v1.2.0` and
`1.2.0` are equal and build metadata is ignored. `version: latest` resolves
the highest remote tag once at init time.",
        params: &[
            ("module", "module path, e.g. github.com/org/lib"),
            ("version", "required version, or `latest`"),
        ],
        remediation: "\
Pin the dependency:
  go get github.com/org/lib@v1.3.0",
        examples: ExamplePair {
            before: r#"require github.com/org/lib v1.2.9"#,
            after: r#"require github.com/org/lib v1.3.0"#,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_rule_name_has_an_explanation() {
        for rule in ids::all_rule_names() {
            let exp = lookup_explanation(rule)
                .unwrap_or_else(|| panic!("rule {rule} should be in registry"));
            assert!(!exp.title.is_empty());
            assert!(!exp.description.is_empty());
            assert!(!exp.params.is_empty(), "rule {rule} should document params");
            assert!(!exp.remediation.is_empty());
        }
    }

    #[test]
    fn lookup_unknown_returns_none() {
        assert!(lookup_explanation("go-dep-something-else").is_none());
        assert!(lookup_explanation("").is_none());
    }
}
