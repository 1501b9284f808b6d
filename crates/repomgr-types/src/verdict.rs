use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Outcome of a completed run.
///
/// Warnings are a reportable outcome, not an error: a run that produced any
/// warning completes evaluation and then fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn from_warning_count(count: usize) -> Self {
        if count == 0 { Verdict::Pass } else { Verdict::Fail }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Pass => "pass",
            Verdict::Fail => "fail",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_follows_warning_count() {
        assert_eq!(Verdict::from_warning_count(0), Verdict::Pass);
        assert_eq!(Verdict::from_warning_count(1), Verdict::Fail);
        assert_eq!(Verdict::from_warning_count(42), Verdict::Fail);
    }

    #[test]
    fn verdict_serializes_lowercase() {
        let json = serde_json::to_string(&Verdict::Fail).expect("serialize verdict");
        assert_eq!(json, "\"fail\"");
        assert_eq!(Verdict::Pass.as_str(), "pass");
    }
}
