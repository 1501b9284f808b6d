use std::collections::BTreeMap;
use thiserror::Error;

pub const PARAM_MODULE: &str = "module";
pub const PARAM_MIN_VERSION: &str = "minVersion";
pub const PARAM_VERSION: &str = "version";

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("missing required param `{0}`")]
    Missing(String),
    #[error("param `{0}` must not be empty")]
    Empty(String),
}

/// Free-form rule parameters.
///
/// Keys are matched case-insensitively: `minVersion` and `minversion` name the
/// same parameter. Values are plain strings; decoding scalars from the spec
/// format happens in the settings layer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleParams(BTreeMap<String, String>);

impl RuleParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.0.insert(key.as_ref().to_lowercase(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Value of a parameter that must be present and non-empty.
    pub fn require(&self, key: &str) -> Result<&str, ParamError> {
        match self.get(key) {
            None => Err(ParamError::Missing(key.to_string())),
            Some("") => Err(ParamError::Empty(key.to_string())),
            Some(v) => Ok(v),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RuleParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = RuleParams::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_case_insensitive() {
        let params: RuleParams = [("minVersion", "v1.2.0")].into_iter().collect();
        assert_eq!(params.get("minversion"), Some("v1.2.0"));
        assert_eq!(params.get("MINVERSION"), Some("v1.2.0"));
        assert_eq!(params.require(PARAM_MIN_VERSION), Ok("v1.2.0"));
    }

    #[test]
    fn require_rejects_missing_and_empty() {
        let params: RuleParams = [("module", "")].into_iter().collect();
        assert_eq!(
            params.require(PARAM_MODULE),
            Err(ParamError::Empty("module".to_string()))
        );
        assert_eq!(
            params.require(PARAM_VERSION),
            Err(ParamError::Missing("version".to_string()))
        );
    }
}
