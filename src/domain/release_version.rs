//! Release version type
//!
//! A `major.minor.patch` triple backed by `semver::Version`, so ordering is
//! always numeric ("10" sorts after "9").

use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Text that is not three dot-separated integers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a major.minor.patch version")]
pub struct InvalidVersion(pub String);

/// A plain release version: major.minor.patch, no pre-release or build metadata
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ReleaseVersion(Version);

impl ReleaseVersion {
    /// Create a version from its numeric parts
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(Version::new(major, minor, patch))
    }

    /// Parse a version that may carry the upstream `v` tag prefix ("v18.10.0")
    pub fn parse_tagged(s: &str) -> Result<Self, InvalidVersion> {
        s.strip_prefix('v').unwrap_or(s).parse()
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    /// The (minor, patch) pair used for staleness comparison within one major
    pub fn minor_patch(&self) -> (u64, u64) {
        (self.0.minor, self.0.patch)
    }

    /// Upstream tag form, e.g. "v18.10.0"
    pub fn tag(&self) -> String {
        format!("v{}", self.0)
    }
}

impl FromStr for ReleaseVersion {
    type Err = InvalidVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidVersion(s.to_string());
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 3 {
            return Err(invalid());
        }

        let mut numbers = [0u64; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            // u64::from_str accepts a leading '+', which is not a version digit
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            *slot = part.parse().map_err(|_| invalid())?;
        }

        Ok(Self::new(numbers[0], numbers[1], numbers[2]))
    }
}

impl TryFrom<String> for ReleaseVersion {
    type Error = InvalidVersion;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReleaseVersion> for String {
    fn from(value: ReleaseVersion) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
