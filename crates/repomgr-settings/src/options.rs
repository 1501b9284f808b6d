use repomgr_types::ids;
use std::time::Duration;

pub const DEFAULT_NETWORK_TIMEOUT_SECS: u64 = 60;

/// Options for one run that do not live in the spec file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    /// Private key path before environment expansion.
    pub private_key: String,
    /// Remote lookup timeout in seconds; `0` disables it.
    pub network_timeout_secs: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            private_key: ids::DEFAULT_PRIVATE_KEY.to_string(),
            network_timeout_secs: DEFAULT_NETWORK_TIMEOUT_SECS,
        }
    }
}

impl RunOptions {
    /// Private key path with `$VAR` and `${VAR}` expanded from the process environment.
    pub fn private_key_path(&self) -> String {
        expand_env(&self.private_key)
    }

    pub fn network_timeout(&self) -> Option<Duration> {
        match self.network_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

pub fn expand_env(input: &str) -> String {
    expand_env_with(input, |name| std::env::var(name).ok())
}

/// Expand `$VAR` and `${VAR}` using `lookup`. Unset variables expand to the
/// empty string. A `$` not followed by a name is kept.
pub fn expand_env_with<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(braced) = after.strip_prefix('{') {
            if let Some(end) = braced.find('}') {
                out.push_str(&lookup(&braced[..end]).unwrap_or_default());
                rest = &braced[end + 1..];
                continue;
            }
            out.push('$');
            rest = after;
            continue;
        }

        let name_len = after
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
            .count();
        if name_len == 0 {
            out.push('$');
            rest = after;
            continue;
        }
        out.push_str(&lookup(&after[..name_len]).unwrap_or_default());
        rest = &after[name_len..];
    }

    out.push_str(rest);
    out
}
