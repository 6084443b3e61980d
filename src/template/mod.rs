//! Definition templates
//!
//! This module provides:
//! - Template loading by kind (alternate, slim, default)
//! - Signing key lists
//! - Pure template rendering

mod keys;
mod render;

pub use keys::KeyRing;
pub use render::{render, RenderContext};

use crate::config::TemplateFiles;
use crate::domain::TemplateKind;
use crate::error::DefinitionError;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A template file and its text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub path: PathBuf,
    pub text: String,
}

impl Template {
    pub fn read(path: impl Into<PathBuf>) -> Result<Self, DefinitionError> {
        let path = path.into();
        let text = fs::read_to_string(&path).map_err(|e| DefinitionError::read_error(&path, e))?;
        Ok(Self { path, text })
    }
}

/// Templates needed for one run, keyed by kind
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    templates: HashMap<TemplateKind, Template>,
}

impl TemplateSet {
    /// Load the templates for the given kinds only
    pub fn load(
        root: &Path,
        files: &TemplateFiles,
        kinds: impl IntoIterator<Item = TemplateKind>,
    ) -> Result<Self, DefinitionError> {
        let mut templates = HashMap::new();
        for kind in kinds {
            if templates.contains_key(&kind) {
                continue;
            }
            let file = match kind {
                TemplateKind::Alternate => &files.alternate,
                TemplateKind::Slim => &files.slim,
                TemplateKind::Default => &files.default,
            };
            templates.insert(kind, Template::read(root.join(file))?);
        }
        Ok(Self { templates })
    }

    pub fn get(&self, kind: TemplateKind) -> Option<&Template> {
        self.templates.get(&kind)
    }
}
