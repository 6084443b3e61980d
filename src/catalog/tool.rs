//! Secondary-tool version source

use crate::catalog::{HttpClient, ToolVersionSource};
use crate::error::CatalogError;
use async_trait::async_trait;

/// Latest-version endpoint returning the bare version as plain text
pub struct YarnVersionSource {
    client: HttpClient,
    url: String,
}

impl YarnVersionSource {
    pub fn new(client: HttpClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ToolVersionSource for YarnVersionSource {
    async fn fetch_tool_version(&self) -> Result<String, CatalogError> {
        let body = self.client.get_text(&self.url, "tool version").await?;
        let version = body.trim();
        if version.is_empty() || version.chars().any(char::is_whitespace) {
            return Err(CatalogError::malformed(
                "tool version",
                format!("unexpected body '{}'", version),
            ));
        }
        Ok(version.to_string())
    }
}
