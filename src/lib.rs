//! dockbump - runtime Docker build definition updater library
//!
//! This library provides the core functionality for keeping a tree of
//! per-major-version Docker build definitions current:
//! - Scanning the definition tree for pinned versions
//! - Fetching the release and alternate build catalogs
//! - Resolving which majors are stale and which families move
//! - Regenerating definitions from templates

pub mod catalog;
pub mod cli;
pub mod config;
pub mod definition;
pub mod domain;
pub mod error;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod resolve;
pub mod template;
