//! Variant naming conventions
//!
//! Variant directory names carry everything needed to classify them:
//! a name prefix marks the alternate (musl-based) family, a name suffix marks
//! the slim template, and the name itself is the base-image tag.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Image repository used for slim variants
const SLIM_BASE_REPOSITORY: &str = "debian";

/// Image repository used for default variants
const DEFAULT_BASE_REPOSITORY: &str = "buildpack-deps";

/// Build lineage a variant belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantFamily {
    /// Standard base OS lineage
    Primary,
    /// Minimal libc lineage that may lag the primary one
    Alternate,
}

impl fmt::Display for VariantFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantFamily::Primary => write!(f, "primary"),
            VariantFamily::Alternate => write!(f, "alternate"),
        }
    }
}

/// Which template a variant is rendered from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Alternate,
    Slim,
    Default,
}

/// A variant sub-directory of a tracked major version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Directory name, e.g. "bookworm-slim" or "alpine3.20"
    pub name: String,
    pub family: VariantFamily,
    pub template: TemplateKind,
}

/// Name-based classification rules for variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantNaming {
    /// Prefix that marks the alternate family ("alpine")
    pub alternate_prefix: String,
    /// Suffix that marks the slim template ("-slim")
    pub slim_suffix: String,
}

impl Default for VariantNaming {
    fn default() -> Self {
        Self {
            alternate_prefix: "alpine".to_string(),
            slim_suffix: "-slim".to_string(),
        }
    }
}

impl VariantNaming {
    /// Classify a variant directory name
    pub fn classify(&self, name: &str) -> Variant {
        Variant {
            name: name.to_string(),
            family: self.family(name),
            template: self.template_kind(name),
        }
    }

    pub fn family(&self, name: &str) -> VariantFamily {
        if name.starts_with(&self.alternate_prefix) {
            VariantFamily::Alternate
        } else {
            VariantFamily::Primary
        }
    }

    /// Prefix wins over suffix: "alpine-slim" still uses the alternate template
    pub fn template_kind(&self, name: &str) -> TemplateKind {
        if name.starts_with(&self.alternate_prefix) {
            TemplateKind::Alternate
        } else if name.ends_with(&self.slim_suffix) {
            TemplateKind::Slim
        } else {
            TemplateKind::Default
        }
    }

    /// Base image reference for the `FROM` line
    ///
    /// - `alpine3.20` -> `alpine:3.20`
    /// - `bookworm-slim` -> `debian:bookworm-slim`
    /// - `bookworm` -> `buildpack-deps:bookworm`
    pub fn base_image(&self, name: &str) -> String {
        match self.template_kind(name) {
            TemplateKind::Alternate => {
                let tag = name.replacen(&self.alternate_prefix, "", 1);
                format!("{}:{}", self.alternate_prefix, tag)
            }
            TemplateKind::Slim => format!("{}:{}", SLIM_BASE_REPOSITORY, name),
            TemplateKind::Default => format!("{}:{}", DEFAULT_BASE_REPOSITORY, name),
        }
    }
}
