//! Upstream support windows

use chrono::NaiveDate;
use serde::Serialize;

/// Period during which a major version line receives releases
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportWindow {
    pub major: u64,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SupportWindow {
    pub fn new(major: u64, start: NaiveDate, end: NaiveDate) -> Self {
        Self { major, start, end }
    }

    /// True once `today` is past the last supported day
    pub fn has_ended(&self, today: NaiveDate) -> bool {
        today > self.end
    }
}
