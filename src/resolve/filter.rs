//! Resolution filters
//!
//! - `MajorFilter`: which tracked major versions take part in a run
//! - `ReleaseAgeFilter`: which catalog entries are old enough to adopt
//! - `SupportFilter`: which tracked majors are past their end of life

use crate::domain::{CatalogEntry, SupportWindow};
use chrono::{DateTime, NaiveDate, Utc};
use std::time::Duration;

/// Major version selection from `--only` / `--exclude`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MajorFilter {
    /// If non-empty, only these majors are processed
    pub only: Vec<u64>,
    pub exclude: Vec<u64>,
}

impl MajorFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_only(mut self, only: Vec<u64>) -> Self {
        self.only = only;
        self
    }

    pub fn with_exclude(mut self, exclude: Vec<u64>) -> Self {
        self.exclude = exclude;
        self
    }

    pub fn should_process(&self, major: u64) -> bool {
        if !self.only.is_empty() && !self.only.contains(&major) {
            return false;
        }
        !self.exclude.contains(&major)
    }
}

/// Minimum release age for catalog entries
#[derive(Debug, Clone)]
pub struct ReleaseAgeFilter {
    min_age: Option<Duration>,
    now: DateTime<Utc>,
}

impl ReleaseAgeFilter {
    pub fn new(min_age: Option<Duration>) -> Self {
        Self::with_time(min_age, Utc::now())
    }

    /// Create a filter with a custom current time (for testing)
    pub fn with_time(min_age: Option<Duration>, now: DateTime<Utc>) -> Self {
        Self { min_age, now }
    }

    /// Entries without a release date are always eligible
    pub fn is_eligible(&self, entry: &CatalogEntry) -> bool {
        let (Some(min_age), Some(released_on)) = (self.min_age, entry.released_on) else {
            return true;
        };
        let Ok(min_age) = chrono::Duration::from_std(min_age) else {
            return false;
        };
        let released_at = released_on.and_time(chrono::NaiveTime::MIN).and_utc();
        self.now.signed_duration_since(released_at) >= min_age
    }
}

impl Default for ReleaseAgeFilter {
    fn default() -> Self {
        Self::new(None)
    }
}

/// End-of-life lookup over the release schedule
///
/// Majors the schedule does not list are treated as supported.
#[derive(Debug, Clone)]
pub struct SupportFilter {
    windows: Vec<SupportWindow>,
    today: NaiveDate,
}

impl SupportFilter {
    pub fn new(windows: Vec<SupportWindow>) -> Self {
        Self::with_date(windows, Utc::now().date_naive())
    }

    /// Create a filter with a custom current date (for testing)
    pub fn with_date(windows: Vec<SupportWindow>, today: NaiveDate) -> Self {
        Self { windows, today }
    }

    /// Last supported day of `major`, if that day has already passed
    pub fn end_of_life(&self, major: u64) -> Option<NaiveDate> {
        self.windows
            .iter()
            .find(|w| w.major == major)
            .filter(|w| w.has_ended(self.today))
            .map(|w| w.end)
    }
}

impl Default for SupportFilter {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
