//! Alternate-build availability annotation

use crate::domain::{CatalogEntry, ReleaseVersion, UpdateDecision};
use std::collections::HashMap;

/// Fill in flavor availability and the security flag on every decision
///
/// A target absent from the build index is treated as "not available, not a
/// security release". When the index lists the same version twice the last
/// listing wins.
pub fn annotate(
    decisions: Vec<UpdateDecision>,
    build_index: &[CatalogEntry],
    flavor: &str,
) -> Vec<UpdateDecision> {
    let by_version: HashMap<&ReleaseVersion, &CatalogEntry> =
        build_index.iter().map(|e| (&e.version, e)).collect();

    decisions
        .into_iter()
        .map(|decision| {
            let (available, security) = by_version
                .get(&decision.target_version)
                .map(|e| (e.has_flavor(flavor), e.is_security_release))
                .unwrap_or((false, false));
            decision.with_availability(available, security)
        })
        .collect()
}
