//! Tracked major versions as read from the definition tree

use super::{ReleaseVersion, Variant, VariantFamily};
use serde::Serialize;

/// Pinned version of one variant family
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantState {
    pub family: VariantFamily,
    /// The variant whose definition supplied the pin
    pub variant: String,
    pub pinned: ReleaseVersion,
}

impl VariantState {
    pub fn new(family: VariantFamily, variant: impl Into<String>, pinned: ReleaseVersion) -> Self {
        Self {
            family,
            variant: variant.into(),
            pinned,
        }
    }
}

/// One tracked major release line, rebuilt from disk on every run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackedVersion {
    pub major: u64,
    pub primary: VariantState,
    pub alternate: VariantState,
    /// All renderable variants of this major, sorted by name
    pub variants: Vec<Variant>,
}

impl TrackedVersion {
    pub fn new(major: u64, primary: VariantState, alternate: VariantState) -> Self {
        Self {
            major,
            primary,
            alternate,
            variants: Vec::new(),
        }
    }

    pub fn with_variants(mut self, variants: Vec<Variant>) -> Self {
        self.variants = variants;
        self
    }

    pub fn state(&self, family: VariantFamily) -> &VariantState {
        match family {
            VariantFamily::Primary => &self.primary,
            VariantFamily::Alternate => &self.alternate,
        }
    }

    /// Variants of one family, in name order
    pub fn variants_in(&self, family: VariantFamily) -> impl Iterator<Item = &Variant> {
        self.variants.iter().filter(move |v| v.family == family)
    }

    /// Alternate builds lag primary builds, never lead
    pub fn alternate_leads(&self) -> bool {
        self.alternate.pinned > self.primary.pinned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VariantNaming;

    fn tracked(primary: &str, alternate: &str) -> TrackedVersion {
        let naming = VariantNaming::default();
        TrackedVersion::new(
            18,
            VariantState::new(VariantFamily::Primary, "bookworm", primary.parse().unwrap()),
            VariantState::new(VariantFamily::Alternate, "alpine3.20", alternate.parse().unwrap()),
        )
        .with_variants(vec![
            naming.classify("alpine3.20"),
            naming.classify("bookworm"),
            naming.classify("bookworm-slim"),
        ])
    }

    #[test]
    fn test_state_by_family() {
        let t = tracked("18.10.0", "18.9.5");
        assert_eq!(t.state(VariantFamily::Primary).pinned.to_string(), "18.10.0");
        assert_eq!(t.state(VariantFamily::Alternate).variant, "alpine3.20");
    }

    #[test]
    fn test_variants_in_family() {
        let t = tracked("18.10.0", "18.10.0");
        let primary: Vec<_> = t
            .variants_in(VariantFamily::Primary)
            .map(|v| v.name.as_str())
            .collect();
        assert_eq!(primary, vec!["bookworm", "bookworm-slim"]);
        assert_eq!(t.variants_in(VariantFamily::Alternate).count(), 1);
    }

    #[test]
    fn test_alternate_leads() {
        assert!(!tracked("18.10.0", "18.9.5").alternate_leads());
        assert!(!tracked("18.10.0", "18.10.0").alternate_leads());
        assert!(tracked("18.9.0", "18.10.0").alternate_leads());
    }
}
