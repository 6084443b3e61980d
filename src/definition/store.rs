//! Definition store abstraction and its filesystem implementation

use crate::error::{DefinitionError, IoError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Read/write access to `<root>/<major>/<variant>/<file>`
pub trait DefinitionStore {
    /// Tracked major versions, ascending
    ///
    /// A major directory is named by the canonical decimal form of its number,
    /// so `major.to_string()` always names it back.
    fn list_majors(&self) -> Result<Vec<u64>, IoError>;

    /// Variant directory names under a major, sorted by name
    fn list_variants(&self, major: u64) -> Result<Vec<String>, IoError>;

    fn definition_path(&self, major: u64, variant: &str) -> PathBuf;

    fn read_definition(&self, major: u64, variant: &str) -> Result<String, DefinitionError> {
        let path = self.definition_path(major, variant);
        fs::read_to_string(&path).map_err(|e| DefinitionError::read_error(path, e))
    }

    fn write_definition(&self, major: u64, variant: &str, content: &str) -> Result<(), DefinitionError> {
        let path = self.definition_path(major, variant);
        fs::write(&path, content).map_err(|e| DefinitionError::write_error(path, e))
    }
}

/// Definition store rooted at a directory on disk
#[derive(Debug, Clone)]
pub struct FsDefinitionStore {
    root: PathBuf,
    file_name: String,
}

impl FsDefinitionStore {
    pub fn new(root: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            file_name: file_name.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Names of the visible child directories of `dir`
fn child_directories(dir: &Path) -> Result<Vec<String>, IoError> {
    if !dir.is_dir() {
        return Err(IoError::directory_not_found(dir));
    }
    let entries = fs::read_dir(dir).map_err(|e| IoError::generic(dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| IoError::generic(dir, e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if !name.starts_with('.') {
                names.push(name.to_string());
            }
        }
    }
    Ok(names)
}

impl DefinitionStore for FsDefinitionStore {
    fn list_majors(&self) -> Result<Vec<u64>, IoError> {
        let mut majors = Vec::new();
        for name in child_directories(&self.root)? {
            if !name.bytes().all(|b| b.is_ascii_digit()) {
                continue;
            }
            match name.parse::<u64>() {
                Ok(major) if major.to_string() == name => majors.push(major),
                _ => warn!(directory = %name, "ignoring non-canonical major directory"),
            }
        }
        majors.sort_unstable();
        Ok(majors)
    }

    fn list_variants(&self, major: u64) -> Result<Vec<String>, IoError> {
        let mut variants = child_directories(&self.root.join(major.to_string()))?;
        variants.sort();
        Ok(variants)
    }

    fn definition_path(&self, major: u64, variant: &str) -> PathBuf {
        self.root
            .join(major.to_string())
            .join(variant)
            .join(&self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tree(dirs: &[&str]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for dir in dirs {
            fs::create_dir_all(temp.path().join(dir)).unwrap();
        }
        temp
    }

    #[test]
    fn test_list_majors_numeric_order() {
        let temp = tree(&["9", "10", "18", "docs", "18-rc", ".git"]);
        fs::write(temp.path().join("20"), "not a directory").unwrap();

        let store = FsDefinitionStore::new(temp.path(), "Dockerfile");
        assert_eq!(store.list_majors().unwrap(), vec![9, 10, 18]);
    }

    #[test]
    fn test_list_majors_ignores_leading_zeros() {
        let temp = tree(&["018", "20", "007", "0"]);

        let store = FsDefinitionStore::new(temp.path(), "Dockerfile");
        let majors = store.list_majors().unwrap();
        assert_eq!(majors, vec![0, 20]);
        for major in majors {
            assert!(store.list_variants(major).is_ok());
        }
    }

    #[test]
    fn test_list_variants_sorted() {
        let temp = tree(&["18/bookworm-slim", "18/alpine3.20", "18/bookworm"]);
        fs::write(temp.path().join("18/README.md"), "notes").unwrap();

        let store = FsDefinitionStore::new(temp.path(), "Dockerfile");
        assert_eq!(
            store.list_variants(18).unwrap(),
            vec!["alpine3.20", "bookworm", "bookworm-slim"]
        );
    }

    #[test]
    fn test_missing_root() {
        let store = FsDefinitionStore::new("/nonexistent/definitions", "Dockerfile");
        assert!(matches!(
            store.list_majors(),
            Err(IoError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_read_write_definition() {
        let temp = tree(&["18/bookworm"]);
        let store = FsDefinitionStore::new(temp.path(), "Dockerfile");

        assert!(matches!(
            store.read_definition(18, "bookworm"),
            Err(DefinitionError::Read { .. })
        ));

        store.write_definition(18, "bookworm", "ENV NODE_VERSION 18.10.0\n").unwrap();
        assert_eq!(
            store.read_definition(18, "bookworm").unwrap(),
            "ENV NODE_VERSION 18.10.0\n"
        );
        assert_eq!(
            store.definition_path(18, "bookworm"),
            temp.path().join("18").join("bookworm").join("Dockerfile")
        );
    }
}
