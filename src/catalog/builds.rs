//! Alternate build index client
//!
//! Endpoints, relative to the configured base URL:
//! - `{base}/index.json`: builds with their flavors and security flags
//! - `{base}/v{version}/SHASUMS256.txt`: checksum manifest per version

use crate::catalog::{parse_index, BuildIndex, HttpClient, ReleaseDescriptor};
use crate::domain::{CatalogEntry, ReleaseVersion};
use crate::error::CatalogError;
use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

/// Artifact archive extension listed in the checksum manifest
const ARCHIVE_EXTENSION: &str = ".tar.xz";

/// Build index reachable over HTTP
pub struct UnofficialBuildIndex {
    client: HttpClient,
    base_url: String,
}

impl UnofficialBuildIndex {
    pub fn new(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn index_url(&self) -> String {
        format!("{}/index.json", self.base_url)
    }

    fn checksum_url(&self, version: &ReleaseVersion) -> String {
        format!("{}/{}/SHASUMS256.txt", self.base_url, version.tag())
    }
}

#[async_trait]
impl BuildIndex for UnofficialBuildIndex {
    fn name(&self) -> &'static str {
        "build index"
    }

    async fn fetch_index(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        let url = self.index_url();
        let descriptors: Vec<ReleaseDescriptor> = self.client.get_json(&url, self.name()).await?;
        let entries = parse_index(self.name(), descriptors)?;
        debug!(url = %url, builds = entries.len(), "fetched build index");
        Ok(entries)
    }

    async fn fetch_checksum(
        &self,
        version: &ReleaseVersion,
        flavor: &str,
    ) -> Result<Option<String>, CatalogError> {
        let url = self.checksum_url(version);
        match self.client.get_text(&url, "checksum manifest").await {
            Ok(manifest) => Ok(extract_checksum(&manifest, flavor)),
            Err(CatalogError::NotFound { .. }) => {
                debug!(url = %url, "no checksum manifest published");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Leading hash of the `<name>-<flavor>.tar.xz` line of a checksum manifest
pub fn extract_checksum(manifest: &str, flavor: &str) -> Option<String> {
    let pattern = format!(
        r"(?m)^(\S+)\s+\S+-{}{}\s*$",
        regex::escape(flavor),
        regex::escape(ARCHIVE_EXTENSION)
    );
    let re = Regex::new(&pattern).ok()?;
    re.captures(manifest)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = "\
3a1c2e0d  node-v20.11.1-linux-x64-glibc-217.tar.xz
9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08  node-v20.11.1-linux-x64-musl.tar.gz
60303ae22b998861bce3b28f33eec1be758a213c86c93c076dbe9f558c11c752  node-v20.11.1-linux-x64-musl.tar.xz
fd61f2b8  node-v20.11.1-linux-arm64-musl.tar.xz
";

    fn index() -> UnofficialBuildIndex {
        UnofficialBuildIndex::new(
            HttpClient::new().unwrap(),
            "https://unofficial-builds.nodejs.org/download/release/",
        )
    }

    #[test]
    fn test_urls() {
        let index = index();
        assert_eq!(
            index.index_url(),
            "https://unofficial-builds.nodejs.org/download/release/index.json"
        );
        assert_eq!(
            index.checksum_url(&ReleaseVersion::new(20, 11, 1)),
            "https://unofficial-builds.nodejs.org/download/release/v20.11.1/SHASUMS256.txt"
        );
    }

    #[test]
    fn test_extract_checksum() {
        assert_eq!(
            extract_checksum(MANIFEST, "linux-x64-musl").as_deref(),
            Some("60303ae22b998861bce3b28f33eec1be758a213c86c93c076dbe9f558c11c752")
        );
        assert_eq!(extract_checksum(MANIFEST, "linux-arm64-musl").as_deref(), Some("fd61f2b8"));
    }

    #[test]
    fn test_extract_checksum_missing_flavor() {
        assert_eq!(extract_checksum(MANIFEST, "linux-armv6l"), None);
        assert_eq!(extract_checksum("", "linux-x64-musl"), None);
    }
}
