//! Release schedule client
//!
//! Fetches the support window of every major version line.
//! Endpoint: https://raw.githubusercontent.com/nodejs/Release/main/schedule.json

use crate::catalog::{HttpClient, SupportSchedule};
use crate::domain::SupportWindow;
use crate::error::CatalogError;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

/// One value of the schedule object; extra phase dates are ignored
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleDescriptor {
    pub start: String,
    pub end: String,
}

/// Turn the raw schedule object into support windows, ordered by major
///
/// Keys are `v<major>`. Pre-1.0 lines such as `v0.10` have no integer major
/// and are left out. An unparseable date fails the whole payload.
pub fn parse_schedule(
    catalog: &str,
    descriptors: BTreeMap<String, ScheduleDescriptor>,
) -> Result<Vec<SupportWindow>, CatalogError> {
    let date = |key: &str, value: &str| {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
            CatalogError::malformed(catalog, format!("{}: bad date '{}': {}", key, value, e))
        })
    };

    let mut windows = Vec::with_capacity(descriptors.len());
    for (key, descriptor) in &descriptors {
        let Some(major) = key.strip_prefix('v').and_then(|m| m.parse::<u64>().ok()) else {
            continue;
        };
        windows.push(SupportWindow::new(
            major,
            date(key, &descriptor.start)?,
            date(key, &descriptor.end)?,
        ));
    }
    windows.sort_by_key(|w| w.major);
    Ok(windows)
}

/// Release schedule reachable over HTTP
pub struct NodeReleaseSchedule {
    client: HttpClient,
    url: String,
}

impl NodeReleaseSchedule {
    pub fn new(client: HttpClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl SupportSchedule for NodeReleaseSchedule {
    fn name(&self) -> &'static str {
        "release schedule"
    }

    async fn fetch_schedule(&self) -> Result<Vec<SupportWindow>, CatalogError> {
        let descriptors: BTreeMap<String, ScheduleDescriptor> =
            self.client.get_json(&self.url, self.name()).await?;
        let windows = parse_schedule(self.name(), descriptors)?;
        debug!(url = %self.url, majors = windows.len(), "fetched release schedule");
        Ok(windows)
    }
}
