//! Build definition store
//!
//! This module provides:
//! - The `DefinitionStore` abstraction over the major/variant tree
//! - The filesystem-backed store
//! - Scanning the tree into tracked versions
//! - Dry-run aware definition writing

mod reader;
mod store;
mod writer;

pub use reader::{extract_pinned_version, scan, Scan};
pub use store::{DefinitionStore, FsDefinitionStore};
pub use writer::{DefinitionWriter, WriteResult};
