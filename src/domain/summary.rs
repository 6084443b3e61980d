//! Run report types
//!
//! Provides structures for tracking what happened to each tracked major
//! version and to the run as a whole.

use super::{ReleaseVersion, UpdateScope, VariantFamily};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Why a tracked major version was left out of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// No variant of this family exists under the major directory
    MissingFamily(VariantFamily),
    /// The family's defining variant has no usable version declaration
    MalformedDefinition(String),
    /// The major directory could not be listed
    Unreadable(String),
    /// The alternate pin is newer than the primary pin
    AlternateAhead {
        primary: ReleaseVersion,
        alternate: ReleaseVersion,
    },
    /// The release schedule lists the major as past its end of life
    EndOfLife { end: NaiveDate },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingFamily(family) => write!(f, "no {} variant", family),
            SkipReason::MalformedDefinition(msg) | SkipReason::Unreadable(msg) => {
                write!(f, "{}", msg)
            }
            SkipReason::AlternateAhead { primary, alternate } => write!(
                f,
                "alternate pin {} is ahead of primary pin {}",
                alternate, primary
            ),
            SkipReason::EndOfLife { end } => write!(f, "end of life since {}", end),
        }
    }
}

/// Why (part of) an update was held back
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeferReason {
    /// The alternate build flavor is not published for the target yet
    MissingFlavor { flavor: String },
    /// The flavor is listed but the checksum manifest has no artifact for it
    MissingChecksum { flavor: String },
}

impl fmt::Display for DeferReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeferReason::MissingFlavor { flavor } => write!(f, "no {} build yet", flavor),
            DeferReason::MissingChecksum { flavor } => {
                write!(f, "no {} checksum published", flavor)
            }
        }
    }
}

/// One variant definition that was rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedVariant {
    pub name: String,
    pub version: ReleaseVersion,
    /// False when the rendered text matched the file byte for byte
    pub changed: bool,
}

/// Outcome for one tracked major version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MajorOutcome {
    /// The major moved to a newer version (possibly for some families only)
    Updated {
        major: u64,
        scope: UpdateScope,
        from: ReleaseVersion,
        to: ReleaseVersion,
        /// Security release rendered without waiting for the alternate flavor
        expedited: bool,
        variants: Vec<RenderedVariant>,
        /// Set when the alternate family was held back
        #[serde(skip_serializing_if = "Option::is_none")]
        deferred: Option<DeferReason>,
    },
    /// A newer version exists but nothing was rendered for it
    Deferred {
        major: u64,
        target: ReleaseVersion,
        reason: DeferReason,
    },
    /// Re-rendered at the pinned versions
    Refreshed {
        major: u64,
        variants: Vec<RenderedVariant>,
    },
    /// Already current
    UpToDate { major: u64 },
    /// Not processed this run
    Skipped { major: u64, reason: SkipReason },
}

impl MajorOutcome {
    pub fn major(&self) -> u64 {
        match self {
            MajorOutcome::Updated { major, .. }
            | MajorOutcome::Deferred { major, .. }
            | MajorOutcome::Refreshed { major, .. }
            | MajorOutcome::UpToDate { major }
            | MajorOutcome::Skipped { major, .. } => *major,
        }
    }

    pub fn is_update(&self) -> bool {
        matches!(self, MajorOutcome::Updated { .. })
    }

    /// Rendered variants, if any
    pub fn variants(&self) -> &[RenderedVariant] {
        match self {
            MajorOutcome::Updated { variants, .. } | MajorOutcome::Refreshed { variants, .. } => {
                variants
            }
            _ => &[],
        }
    }
}

/// A single variant excluded from rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedVariant {
    pub major: u64,
    pub variant: String,
    pub reason: String,
}

/// Everything one resolution cycle did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct RunReport {
    pub dry_run: bool,
    pub should_update: bool,
    pub outcomes: Vec<MajorOutcome>,
    pub skipped_variants: Vec<SkippedVariant>,
    pub errors: Vec<String>,
}

impl RunReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    pub fn add_outcome(&mut self, outcome: MajorOutcome) {
        self.outcomes.push(outcome);
        self.outcomes.sort_by_key(MajorOutcome::major);
    }

    /// Target versions of majors that had at least one variant rendered
    pub fn updated_versions(&self) -> Vec<&ReleaseVersion> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                MajorOutcome::Updated { to, variants, .. } if !variants.is_empty() => Some(to),
                _ => None,
            })
            .collect()
    }

    pub fn updates(&self) -> impl Iterator<Item = &MajorOutcome> {
        self.outcomes.iter().filter(|o| o.is_update())
    }

    /// Number of definition files whose content changed
    pub fn files_changed(&self) -> usize {
        self.outcomes
            .iter()
            .flat_map(|o| o.variants())
            .filter(|v| v.changed)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
