//! The `explain` use case: look up rule documentation.

use repomgr_types::explain::{Explanation, lookup_explanation};
use repomgr_types::ids;

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    /// Found an explanation for the rule.
    Found(Explanation),
    /// Unknown rule name; includes the available rule names.
    NotFound {
        rule: String,
        available_rules: &'static [&'static str],
    },
}

/// Look up an explanation for a rule name.
pub fn run_explain(rule: &str) -> ExplainOutput {
    match lookup_explanation(rule) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            rule: rule.to_string(),
            available_rules: ids::all_rule_names(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    out.push_str(exp.title);
    out.push('\n');
    out.push_str(&"=".repeat(exp.title.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\n");

    out.push_str("Params\n");
    out.push_str("------\n");
    for (name, doc) in exp.params {
        out.push_str(&format!("  {name}: {doc}\n"));
    }
    out.push('\n');

    out.push_str("Remediation\n");
    out.push_str("-----------\n");
    out.push_str(exp.remediation);
    out.push_str("\n\n");
    out.push_str("Examples\n");
    out.push_str("--------\n\n");
    out.push_str("Before (violation):\n");
    out.push_str("```go.mod\n");
    out.push_str(exp.examples.before);
    out.push('\n');
    out.push_str("```\n\n");
    out.push_str("After (fixed):\n");
    out.push_str("```go.mod\n");
    out.push_str(exp.examples.after);
    out.push('\n');
    out.push_str("```\n");

    out
}

/// Format the "not found" message for terminal display.
pub fn format_not_found(rule: &str, available: &[&str]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown rule: {rule}\n\n"));
    out.push_str("Available rules:\n");
    for name in available {
        out.push_str(&format!("  - {name}\n"));
    }

    out
}
