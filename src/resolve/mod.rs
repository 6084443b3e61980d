//! Staleness resolution for tracked major versions
//!
//! This module provides:
//! - The resolver comparing pinned versions against the release catalog
//! - Alternate-build availability annotation
//! - Scope planning under the missing-flavor policy
//! - Major version and release age filters

pub mod availability;
mod filter;
pub mod plan;

pub use filter::{MajorFilter, ReleaseAgeFilter, SupportFilter};
pub use plan::{plan, PlanOutcome, RenderPlan};

use crate::domain::{
    CatalogEntry, ReleaseVersion, TrackedVersion, UpdateDecision, UpdateScope, VariantFamily,
};
use std::collections::BTreeMap;

/// Result of one resolution pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// At most one decision per major, ascending by major
    pub decisions: Vec<UpdateDecision>,
    /// True when applying the decisions changes at least one pin
    pub should_update: bool,
}

impl Resolution {
    pub fn decision_for(&self, major: u64) -> Option<&UpdateDecision> {
        self.decisions.iter().find(|d| d.major == major)
    }
}

/// Decides, per tracked major, whether a newer release should be adopted
#[derive(Debug, Clone, Default)]
pub struct StalenessResolver {
    age: ReleaseAgeFilter,
}

impl StalenessResolver {
    pub fn new(age: ReleaseAgeFilter) -> Self {
        Self { age }
    }

    /// Compare the tracked pins against every catalog entry
    ///
    /// Entries for untracked majors are ignored. When several entries qualify
    /// for the same major the newest target wins, whatever the catalog order;
    /// entries with an identical target fall back to last-write-wins.
    pub fn resolve(&self, tracked: &[TrackedVersion], catalog: &[CatalogEntry]) -> Resolution {
        let by_major: BTreeMap<u64, &TrackedVersion> =
            tracked.iter().map(|t| (t.major, t)).collect();
        let mut decisions: BTreeMap<u64, UpdateDecision> = BTreeMap::new();

        for entry in catalog {
            if !self.age.is_eligible(entry) {
                continue;
            }
            let Some(current) = by_major.get(&entry.version.major()) else {
                continue;
            };
            let Some(scope) = judge(current, &entry.version) else {
                continue;
            };

            let supersedes = decisions
                .get(&current.major)
                .map_or(true, |existing| entry.version >= existing.target_version);
            if supersedes {
                decisions.insert(
                    current.major,
                    UpdateDecision::new(current, entry.version.clone(), scope),
                );
            }
        }

        let decisions: Vec<UpdateDecision> = decisions.into_values().collect();
        let should_update =
            !decisions.is_empty() && pins_after(tracked, &decisions) != pins_before(tracked);

        Resolution {
            decisions,
            should_update,
        }
    }
}

/// Scope a candidate release earns against one tracked major, if any
///
/// Minor and patch are compared as integers, minor first.
pub fn judge(tracked: &TrackedVersion, candidate: &ReleaseVersion) -> Option<UpdateScope> {
    let primary = &tracked.primary.pinned;
    let alternate = &tracked.alternate.pinned;

    let new_primary = candidate.minor_patch() > primary.minor_patch();
    let new_alternate = candidate.minor_patch() > alternate.minor_patch();
    let alternate_behind = alternate != primary;
    let is_catch_up = alternate_behind && new_alternate && candidate == primary;

    if new_primary {
        Some(UpdateScope::Full)
    } else if is_catch_up {
        Some(UpdateScope::AlternateOnly)
    } else {
        None
    }
}

type PinSet = BTreeMap<u64, (ReleaseVersion, ReleaseVersion)>;

fn pins_before(tracked: &[TrackedVersion]) -> PinSet {
    tracked
        .iter()
        .map(|t| (t.major, (t.primary.pinned.clone(), t.alternate.pinned.clone())))
        .collect()
}

fn pins_after(tracked: &[TrackedVersion], decisions: &[UpdateDecision]) -> PinSet {
    let mut pins = pins_before(tracked);
    for decision in decisions {
        pins.insert(
            decision.major,
            (
                decision.pinned_after(VariantFamily::Primary).clone(),
                decision.pinned_after(VariantFamily::Alternate).clone(),
            ),
        );
    }
    pins
}
