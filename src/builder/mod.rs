//! Builder module for importing an INPX catalog into a collection database
//!
//! This module contains the catalog scanner, which pairs index-descriptor
//! entries with physical book archives, and the build orchestrator, which
//! processes the scanned entries concurrently and persists the result.

pub mod collection_builder;
pub mod scanner;

// Re-export commonly used types for convenience
pub use collection_builder::{BuildConfig, CollectionBuilder};
pub use scanner::{INDEX_DESCRIPTOR_EXT, ScanList, collect_files};
