//! Signing key lists

use crate::config::KeyFiles;
use crate::error::DefinitionError;
use std::fs;
use std::path::Path;

/// Release signing keys, one fingerprint per entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyRing {
    pub runtime: Vec<String>,
    pub tool: Vec<String>,
}

impl KeyRing {
    pub fn load(root: &Path, files: &KeyFiles) -> Result<Self, DefinitionError> {
        Ok(Self {
            runtime: read_keys(&root.join(&files.runtime))?,
            tool: read_keys(&root.join(&files.tool))?,
        })
    }
}

/// One key per non-blank line, surrounding whitespace trimmed
fn read_keys(path: &Path) -> Result<Vec<String>, DefinitionError> {
    let content = fs::read_to_string(path).map_err(|e| DefinitionError::read_error(path, e))?;
    Ok(parse_keys(&content))
}

fn parse_keys(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
