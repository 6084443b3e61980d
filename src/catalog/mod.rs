//! Upstream catalogs
//!
//! This module provides:
//! - HTTP transport shared by every catalog
//! - Release index client (the authoritative version list)
//! - Alternate build index client (flavor availability and checksums)
//! - Secondary-tool version source
//! - Optional release schedule (support windows)

mod builds;
mod client;
mod index;
mod releases;
mod schedule;
mod tool;

pub use builds::{extract_checksum, UnofficialBuildIndex};
pub use client::HttpClient;
pub use index::{parse_index, ReleaseDescriptor};
pub use releases::NodeReleaseIndex;
pub use schedule::{parse_schedule, NodeReleaseSchedule, ScheduleDescriptor};
pub use tool::YarnVersionSource;

use crate::domain::{CatalogEntry, ReleaseVersion, SupportWindow};
use crate::error::CatalogError;
use async_trait::async_trait;

/// The authoritative release index
#[async_trait]
pub trait ReleaseCatalog: Send + Sync {
    /// Catalog name used in messages
    fn name(&self) -> &'static str;

    /// Every listed release, deduplicated by version, in index order
    async fn fetch_releases(&self) -> Result<Vec<CatalogEntry>, CatalogError>;
}

/// Secondary catalog of alternate-flavor builds
#[async_trait]
pub trait BuildIndex: Send + Sync {
    fn name(&self) -> &'static str;

    /// Every listed build, with its published flavors and security flag
    async fn fetch_index(&self) -> Result<Vec<CatalogEntry>, CatalogError>;

    /// Checksum of the `flavor` artifact for `version`
    ///
    /// `Ok(None)` when the manifest exists but lists no such artifact, or when
    /// no manifest is published for the version.
    async fn fetch_checksum(
        &self,
        version: &ReleaseVersion,
        flavor: &str,
    ) -> Result<Option<String>, CatalogError>;
}

/// Version of the secondary tool baked into every definition
#[async_trait]
pub trait ToolVersionSource: Send + Sync {
    async fn fetch_tool_version(&self) -> Result<String, CatalogError>;
}

/// Published support windows per major version line
#[async_trait]
pub trait SupportSchedule: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_schedule(&self) -> Result<Vec<SupportWindow>, CatalogError>;
}
