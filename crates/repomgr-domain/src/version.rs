//! Lenient semantic versions.
//!
//! Go module tags and `go` directives do not follow strict semver syntax:
//! tags carry a `v` prefix and language versions omit the patch number. This
//! type accepts those forms, normalizes them to a full [`semver::Version`], and
//! keeps the original text for messages.

use semver::{BuildMetadata, Prerelease};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid semantic version `{input}`: {reason}")]
pub struct VersionError {
    pub input: String,
    pub reason: &'static str,
}

/// A parsed version plus its original spelling.
///
/// Equality and ordering follow semantic-version precedence: major, minor and
/// patch numerically, then pre-release identifiers, where a release outranks
/// all of its pre-releases. Build metadata is ignored.
#[derive(Clone, Debug)]
pub struct Version {
    inner: semver::Version,
    original: String,
}

impl Version {
    /// Parse `[v]MAJOR[.MINOR[.PATCH]][-PRERELEASE][+BUILD]`.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let err = |reason| VersionError {
            input: input.to_string(),
            reason,
        };

        let body = input.strip_prefix('v').unwrap_or(input);
        if body.is_empty() {
            return Err(err("empty version"));
        }

        let (rest, build) = match body.split_once('+') {
            Some((rest, build)) => (rest, Some(build)),
            None => (body, None),
        };
        let (core, pre) = match rest.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (rest, None),
        };

        let mut numbers = [0u64; 3];
        let mut count = 0;
        for part in core.split('.') {
            if count == numbers.len() {
                return Err(err("more than three numeric components"));
            }
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(err("numeric component expected"));
            }
            numbers[count] = part
                .parse::<u64>()
                .map_err(|_| err("numeric component out of range"))?;
            count += 1;
        }

        let pre = match pre {
            None => Prerelease::EMPTY,
            Some("") => return Err(err("empty pre-release")),
            Some(p) => Prerelease::new(p).map_err(|_| err("invalid pre-release"))?,
        };
        let build = match build {
            None => BuildMetadata::EMPTY,
            Some("") => return Err(err("empty build metadata")),
            Some(b) => BuildMetadata::new(b).map_err(|_| err("invalid build metadata"))?,
        };

        Ok(Self {
            inner: semver::Version {
                major: numbers[0],
                minor: numbers[1],
                patch: numbers[2],
                pre,
                build,
            },
            original: input.to_string(),
        })
    }

    /// The text this version was parsed from.
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn semver(&self) -> &semver::Version {
        &self.inner
    }

    pub fn is_prerelease(&self) -> bool {
        !self.inner.pre.is_empty()
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (&self.inner, &other.inner);
        a.major
            .cmp(&b.major)
            .then(a.minor.cmp(&b.minor))
            .then(a.patch.cmp(&b.patch))
            .then_with(|| a.pre.cmp(&b.pre))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}
