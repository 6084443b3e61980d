//! Definition tree scanning
//!
//! Rebuilds the tracked versions from disk: one `TrackedVersion` per
//! all-digit major directory that has both a primary and an alternate
//! variant with a readable version declaration.

use crate::config::DefinitionSettings;
use crate::definition::DefinitionStore;
use crate::domain::{
    ReleaseVersion, SkipReason, SkippedVariant, TrackedVersion, Variant, VariantFamily,
    VariantState,
};
use crate::error::{DefinitionError, IoError};
use crate::resolve::MajorFilter;
use regex::Regex;
use std::path::Path;
use tracing::{debug, warn};

/// Outcome of scanning the definition tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scan {
    /// Usable majors, ascending
    pub tracked: Vec<TrackedVersion>,
    /// Majors left out of this run
    pub skipped: Vec<(u64, SkipReason)>,
    /// Non-defining variants left out of rendering
    pub skipped_variants: Vec<SkippedVariant>,
}

/// Read the pinned version from a definition's `<token> <version>` line
///
/// The declaration must start the line; the captured value must be three
/// dot-separated integers.
pub fn extract_pinned_version(
    path: &Path,
    content: &str,
    token: &str,
) -> Result<ReleaseVersion, DefinitionError> {
    let pattern = format!(r"(?m)^{}[ \t=]+(\S+)[ \t]*\r?$", regex::escape(token));
    let re = Regex::new(&pattern).map_err(|e| DefinitionError::malformed(path, e.to_string()))?;

    let value = re
        .captures(content)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| DefinitionError::malformed(path, format!("no '{}' declaration", token)))?;

    value
        .as_str()
        .parse()
        .map_err(|e: crate::domain::InvalidVersion| DefinitionError::malformed(path, e.to_string()))
}

fn read_pin(
    store: &dyn DefinitionStore,
    major: u64,
    variant: &str,
    token: &str,
) -> Result<ReleaseVersion, DefinitionError> {
    let content = store.read_definition(major, variant)?;
    extract_pinned_version(&store.definition_path(major, variant), &content, token)
}

/// Enumerate tracked majors and their pinned versions
///
/// Only a missing or unreadable root is fatal; every per-major problem is
/// reported in the returned `Scan`.
pub fn scan(
    store: &dyn DefinitionStore,
    settings: &DefinitionSettings,
    filter: &MajorFilter,
) -> Result<Scan, IoError> {
    let mut result = Scan::default();

    for major in store.list_majors()? {
        if !filter.should_process(major) {
            debug!(major, "excluded by major filter");
            continue;
        }

        let names = match store.list_variants(major) {
            Ok(names) => names,
            Err(e) => {
                let reason = SkipReason::Unreadable(e.to_string());
                warn!(major, %reason, "skipping major version");
                result.skipped.push((major, reason));
                continue;
            }
        };
        let variants: Vec<Variant> = names.iter().map(|name| settings.naming.classify(name)).collect();

        match scan_major(store, settings, major, variants) {
            Ok((tracked, skipped_variants)) => {
                result.tracked.push(tracked);
                result.skipped_variants.extend(skipped_variants);
            }
            Err(reason) => {
                warn!(major, %reason, "skipping major version");
                result.skipped.push((major, reason));
            }
        }
    }

    Ok(result)
}

fn scan_major(
    store: &dyn DefinitionStore,
    settings: &DefinitionSettings,
    major: u64,
    variants: Vec<Variant>,
) -> Result<(TrackedVersion, Vec<SkippedVariant>), SkipReason> {
    let token = settings.version_token.as_str();
    let defining = |family: VariantFamily| {
        variants
            .iter()
            .find(|v| v.family == family)
            .map(|v| v.name.clone())
            .ok_or(SkipReason::MissingFamily(family))
    };
    let primary_name = defining(VariantFamily::Primary)?;
    let alternate_name = defining(VariantFamily::Alternate)?;

    let pin = |name: &str| {
        read_pin(store, major, name, token).map_err(|e| SkipReason::MalformedDefinition(e.to_string()))
    };
    let primary = pin(&primary_name)?;
    let alternate = pin(&alternate_name)?;

    if alternate > primary {
        return Err(SkipReason::AlternateAhead { primary, alternate });
    }

    let mut renderable = Vec::with_capacity(variants.len());
    let mut skipped = Vec::new();
    for variant in variants {
        if variant.name == primary_name || variant.name == alternate_name {
            renderable.push(variant);
            continue;
        }
        match read_pin(store, major, &variant.name, token) {
            Ok(_) => renderable.push(variant),
            Err(e) => {
                warn!(major, variant = %variant.name, error = %e, "skipping variant");
                skipped.push(SkippedVariant {
                    major,
                    variant: variant.name,
                    reason: e.to_string(),
                });
            }
        }
    }

    let tracked = TrackedVersion::new(
        major,
        VariantState::new(VariantFamily::Primary, primary_name, primary),
        VariantState::new(VariantFamily::Alternate, alternate_name, alternate),
    )
    .with_variants(renderable);

    Ok((tracked, skipped))
}
