//! Release index client
//!
//! Fetches the authoritative release list.
//! Endpoint: https://nodejs.org/dist/index.json

use crate::catalog::{parse_index, HttpClient, ReleaseCatalog, ReleaseDescriptor};
use crate::domain::CatalogEntry;
use crate::error::CatalogError;
use async_trait::async_trait;
use tracing::debug;

/// Release index reachable over HTTP
pub struct NodeReleaseIndex {
    client: HttpClient,
    url: String,
}

impl NodeReleaseIndex {
    pub fn new(client: HttpClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ReleaseCatalog for NodeReleaseIndex {
    fn name(&self) -> &'static str {
        "release index"
    }

    async fn fetch_releases(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        let descriptors: Vec<ReleaseDescriptor> = self.client.get_json(&self.url, self.name()).await?;
        let entries = parse_index(self.name(), descriptors)?;
        debug!(url = %self.url, releases = entries.len(), "fetched release index");
        Ok(entries)
    }
}
