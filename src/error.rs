//! Application error types using thiserror
//!
//! Error hierarchy:
//! - CatalogError: Issues fetching or parsing remote release catalogs
//! - DefinitionError: Issues with on-disk build definitions and templates
//! - ConfigError: Issues with CLI or file configuration
//! - IoError: File system operation failures

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Remote catalog related errors
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Build definition related errors
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO related errors
    #[error(transparent)]
    Io(#[from] IoError),

    /// A required alternate-flavor build is not published yet
    #[error("no {flavor} build published for {version} yet")]
    MissingFlavor { version: String, flavor: String },
}

/// Errors related to remote catalog communication
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Transport failure or non-success status
    #[error("{catalog} is unavailable: {message}")]
    Unavailable { catalog: String, message: String },

    /// The resource does not exist
    #[error("{catalog} returned 404 for {url}")]
    NotFound { catalog: String, url: String },

    /// Timeout
    #[error("timeout while fetching {catalog}")]
    Timeout { catalog: String },

    /// Payload is not the expected structured data
    #[error("malformed response from {catalog}: {message}")]
    Malformed { catalog: String, message: String },
}

/// Errors related to build definitions and templates
#[derive(Error, Debug)]
pub enum DefinitionError {
    /// Definition lacks its version declaration or it is not a version triple
    #[error("malformed definition {path}: {message}")]
    Malformed { path: PathBuf, message: String },

    /// Template lacks a required substitution point
    #[error("template {path} has no '{placeholder}' substitution point")]
    MissingPlaceholder { path: PathBuf, placeholder: String },

    /// Failed to read a definition, template or key file
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a definition file
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid duration format
    #[error("invalid duration format '{value}': expected format like '2w', '10d', '1m'")]
    InvalidDuration { value: String },

    /// Config file could not be parsed
    #[error("failed to parse config {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Invalid path
    #[error("invalid path '{path}': {message}")]
    InvalidPath { path: PathBuf, message: String },

    /// Conflicting options
    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },
}

/// Errors related to IO operations
#[derive(Error, Debug)]
pub enum IoError {
    /// Directory not found
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Generic IO error
    #[error("IO error at {path}: {source}")]
    Generic {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    /// Creates a new Unavailable error
    pub fn unavailable(catalog: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::Unavailable {
            catalog: catalog.into(),
            message: message.into(),
        }
    }

    /// Creates a new Malformed error
    pub fn malformed(catalog: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::Malformed {
            catalog: catalog.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(catalog: impl Into<String>) -> Self {
        CatalogError::Timeout {
            catalog: catalog.into(),
        }
    }

    /// True for transport-level failures (unreachable, bad status, timeout)
    pub fn is_unavailable(&self) -> bool {
        !self.is_malformed()
    }

    /// True when the payload arrived but could not be understood
    pub fn is_malformed(&self) -> bool {
        matches!(self, CatalogError::Malformed { .. })
    }
}

impl DefinitionError {
    /// Creates a new Malformed error
    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        DefinitionError::Malformed {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new MissingPlaceholder error
    pub fn missing_placeholder(path: impl Into<PathBuf>, placeholder: impl Into<String>) -> Self {
        DefinitionError::MissingPlaceholder {
            path: path.into(),
            placeholder: placeholder.into(),
        }
    }

    /// Creates a new Read error
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DefinitionError::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a new Write error
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DefinitionError::Write {
            path: path.into(),
            source,
        }
    }
}

impl IoError {
    /// Creates a new DirectoryNotFound error
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        IoError::DirectoryNotFound { path: path.into() }
    }

    /// Creates a new Generic IO error
    pub fn generic(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::Generic {
            path: path.into(),
            source,
        }
    }
}
