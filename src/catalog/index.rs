//! Release descriptor parsing shared by both JSON indexes

use crate::domain::{CatalogEntry, ReleaseVersion};
use crate::error::CatalogError;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashSet;

/// One element of an index.json array
///
/// Only `version` is required; the other fields default when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseDescriptor {
    pub version: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub security: bool,
    #[serde(default)]
    pub files: Vec<String>,
}

/// Turn raw descriptors into catalog entries
///
/// Order is preserved and the first occurrence of a version wins. A version
/// that is not `v<int>.<int>.<int>` fails the whole payload.
pub fn parse_index(
    catalog: &str,
    descriptors: Vec<ReleaseDescriptor>,
) -> Result<Vec<CatalogEntry>, CatalogError> {
    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(descriptors.len());

    for descriptor in descriptors {
        let version = ReleaseVersion::parse_tagged(&descriptor.version)
            .map_err(|e| CatalogError::malformed(catalog, e.to_string()))?;
        if !seen.insert(version.clone()) {
            continue;
        }

        let mut entry = CatalogEntry::new(version)
            .with_security(descriptor.security)
            .with_flavors(descriptor.files);
        if let Some(date) = descriptor
            .date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        {
            entry = entry.with_release_date(date);
        }
        entries.push(entry);
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
        let descriptors: Vec<ReleaseDescriptor> = serde_json::from_str(json).unwrap();
        parse_index("release index", descriptors)
    }

    #[test]
    fn test_parse_full_descriptor() {
        let entries = parse(
            r#"[{"version":"v20.11.1","date":"2024-02-14","security":true,
                 "files":["linux-x64","linux-x64-musl"],"npm":"10.2.4","lts":"Iron"}]"#,
        )
        .unwrap();

        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.version, ReleaseVersion::new(20, 11, 1));
        assert!(entry.is_security_release);
        assert!(entry.has_flavor("linux-x64-musl"));
        assert_eq!(entry.released_on, NaiveDate::from_ymd_opt(2024, 2, 14));
    }

    #[test]
    fn test_parse_minimal_descriptor() {
        let entries = parse(r#"[{"version":"v18.10.0"}]"#).unwrap();
        assert!(!entries[0].is_security_release);
        assert!(entries[0].available_build_flavors.is_empty());
        assert!(entries[0].released_on.is_none());
    }

    #[test]
    fn test_dedup_keeps_first_and_order() {
        let entries = parse(
            r#"[{"version":"v18.10.0","security":true},
                {"version":"v16.16.0"},
                {"version":"v18.10.0","security":false}]"#,
        )
        .unwrap();
        let versions: Vec<String> = entries.iter().map(|e| e.version.to_string()).collect();
        assert_eq!(versions, vec!["18.10.0", "16.16.0"]);
        assert!(entries[0].is_security_release);
    }

    #[test]
    fn test_bad_version_is_malformed() {
        let err = parse(r#"[{"version":"v18.10"}]"#).unwrap_err();
        assert!(err.is_malformed());

        let err = parse(r#"[{"version":"v18.10.0-rc.1"}]"#).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_unparseable_date_ignored() {
        let entries = parse(r#"[{"version":"v18.10.0","date":"yesterday"}]"#).unwrap();
        assert!(entries[0].released_on.is_none());
    }
}
