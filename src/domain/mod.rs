//! Core domain models for dockbump
//!
//! This module contains the fundamental types used throughout the application:
//! - Release versions with numeric ordering
//! - Variant naming, families and template kinds
//! - Tracked major versions read from the definition tree
//! - Catalog entries from the upstream release indexes
//! - Support windows from the release schedule
//! - Update decisions and the run report

mod catalog_entry;
mod decision;
mod release_version;
mod summary;
mod support;
mod tracked;
mod variant;

pub use catalog_entry::CatalogEntry;
pub use decision::{UpdateDecision, UpdateScope};
pub use release_version::{InvalidVersion, ReleaseVersion};
pub use summary::{
    DeferReason, MajorOutcome, RenderedVariant, RunReport, SkipReason, SkippedVariant,
};
pub use support::SupportWindow;
pub use tracked::{TrackedVersion, VariantState};
pub use variant::{TemplateKind, Variant, VariantFamily, VariantNaming};
