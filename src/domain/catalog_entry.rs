//! Upstream release records

use super::ReleaseVersion;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

/// One release as listed by an upstream index
///
/// Immutable once fetched; both the release index and the alternate build
/// index produce these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub version: ReleaseVersion,
    pub is_security_release: bool,
    /// Release date, when the index publishes one
    pub released_on: Option<NaiveDate>,
    /// Platform-flavor identifiers with a published artifact
    pub available_build_flavors: BTreeSet<String>,
}

impl CatalogEntry {
    pub fn new(version: ReleaseVersion) -> Self {
        Self {
            version,
            is_security_release: false,
            released_on: None,
            available_build_flavors: BTreeSet::new(),
        }
    }

    pub fn with_security(mut self, security: bool) -> Self {
        self.is_security_release = security;
        self
    }

    pub fn with_release_date(mut self, date: NaiveDate) -> Self {
        self.released_on = Some(date);
        self
    }

    pub fn with_flavors<I, S>(mut self, flavors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.available_build_flavors = flavors.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_flavor(&self, flavor: &str) -> bool {
        self.available_build_flavors.contains(flavor)
    }
}
