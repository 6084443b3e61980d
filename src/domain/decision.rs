//! Update decisions produced by the staleness resolver

use super::{ReleaseVersion, TrackedVersion, VariantFamily};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which variant families an update applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateScope {
    None,
    /// Every variant family moves to the target
    Full,
    /// Only the alternate family catches up to what primary already has
    AlternateOnly,
    /// Only the primary family moves; alternate waits for its build flavor
    PrimaryOnly,
}

impl UpdateScope {
    pub fn includes(&self, family: VariantFamily) -> bool {
        match self {
            UpdateScope::None => false,
            UpdateScope::Full => true,
            UpdateScope::AlternateOnly => family == VariantFamily::Alternate,
            UpdateScope::PrimaryOnly => family == VariantFamily::Primary,
        }
    }
}

impl fmt::Display for UpdateScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateScope::None => write!(f, "none"),
            UpdateScope::Full => write!(f, "full"),
            UpdateScope::AlternateOnly => write!(f, "alternate only"),
            UpdateScope::PrimaryOnly => write!(f, "primary only"),
        }
    }
}

/// Resolution output for one tracked major version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateDecision {
    pub major: u64,
    pub primary_pinned: ReleaseVersion,
    pub alternate_pinned: ReleaseVersion,
    pub target_version: ReleaseVersion,
    pub scope: UpdateScope,
    pub is_security_release: bool,
    pub alternate_flavor_available: bool,
}

impl UpdateDecision {
    /// A decision for `tracked` with the availability flags still unset
    pub fn new(tracked: &TrackedVersion, target_version: ReleaseVersion, scope: UpdateScope) -> Self {
        Self {
            major: tracked.major,
            primary_pinned: tracked.primary.pinned.clone(),
            alternate_pinned: tracked.alternate.pinned.clone(),
            target_version,
            scope,
            is_security_release: false,
            alternate_flavor_available: false,
        }
    }

    pub fn with_availability(mut self, flavor_available: bool, security: bool) -> Self {
        self.alternate_flavor_available = flavor_available;
        self.is_security_release = security;
        self
    }

    pub fn with_scope(mut self, scope: UpdateScope) -> Self {
        self.scope = scope;
        self
    }

    /// The version pinned before this decision is applied
    pub fn pinned(&self, family: VariantFamily) -> &ReleaseVersion {
        match family {
            VariantFamily::Primary => &self.primary_pinned,
            VariantFamily::Alternate => &self.alternate_pinned,
        }
    }

    /// The version a family ends up pinned at once this decision is applied
    pub fn pinned_after(&self, family: VariantFamily) -> &ReleaseVersion {
        if self.scope.includes(family) {
            &self.target_version
        } else {
            self.pinned(family)
        }
    }
}
