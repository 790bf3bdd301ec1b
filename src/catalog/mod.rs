//! Catalog container access
//!
//! An INPX catalog is a container archive bundling one index-descriptor
//! file per book archive. This module defines the capability the import
//! pipeline consumes — listing entries and extracting a single entry to a
//! scratch location — and a zip-backed default implementation.

pub mod zip_catalog;

pub use zip_catalog::ZipCatalog;

use std::path::{Path, PathBuf};

use crate::Result;

/// One listed item inside a catalog container.
///
/// Immutable once listed; the `locator` is only meaningful to the
/// [`CatalogSource`] that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Entry file name as stored in the container
    pub name: String,
    /// Opaque extraction locator (position within the container)
    pub locator: u64,
}

/// Capability for listing and extracting catalog container entries.
///
/// Implementations must be shareable across worker threads; extraction of
/// distinct entries may run concurrently.
pub trait CatalogSource: Send + Sync {
    /// Lists all file entries of the container at `catalog_path`.
    fn list_entries(&self, catalog_path: &Path) -> Result<Vec<CatalogEntry>>;

    /// Extracts one entry into the directory `dest_dir` and returns the
    /// path of the extracted file.
    ///
    /// `dest_dir` is a caller-scoped scratch location; implementations
    /// write exactly one file into it and never remove it themselves.
    fn extract_entry(
        &self,
        catalog_path: &Path,
        dest_dir: &Path,
        entry: &CatalogEntry,
    ) -> Result<PathBuf>;
}
