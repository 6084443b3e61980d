//! Definition file writing
//!
//! This module provides:
//! - DefinitionWriter for putting rendered definitions on disk
//! - Dry-run mode support (no actual file modifications)
//! - Write avoidance when the rendered text matches the file

use crate::definition::DefinitionStore;
use crate::error::DefinitionError;
use std::path::PathBuf;
use tracing::debug;

/// Writer that applies rendered definitions to a store
#[derive(Debug, Clone, Copy)]
pub struct DefinitionWriter {
    /// Whether to run in dry-run mode (no file modifications)
    dry_run: bool,
}

/// Result of writing one definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteResult {
    pub path: PathBuf,
    /// The rendered text differs from what was on disk
    pub changed: bool,
    /// The file was actually written
    pub file_modified: bool,
}

impl DefinitionWriter {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Create a DefinitionWriter in dry-run mode
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Write `content` as the definition of (`major`, `variant`)
    ///
    /// A file whose current content is byte-identical is left untouched.
    pub fn write(
        &self,
        store: &dyn DefinitionStore,
        major: u64,
        variant: &str,
        content: &str,
    ) -> Result<WriteResult, DefinitionError> {
        let path = store.definition_path(major, variant);
        let changed = match store.read_definition(major, variant) {
            Ok(current) => current != content,
            Err(_) => true,
        };

        let mut result = WriteResult {
            path,
            changed,
            file_modified: false,
        };
        if !changed {
            debug!(path = %result.path.display(), "definition already current");
            return Ok(result);
        }
        if self.dry_run {
            debug!(path = %result.path.display(), "dry run, not writing");
            return Ok(result);
        }

        store.write_definition(major, variant, content)?;
        result.file_modified = true;
        Ok(result)
    }
}
