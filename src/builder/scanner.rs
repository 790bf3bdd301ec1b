//! Catalog scanner: pairs catalog entries with physical book archives.
//!
//! Scanning lists the catalog container, keeps only index-descriptor
//! (`.inp`) entries, and matches each against the books directory by file
//! stem, single level, no recursion. Matched entries accumulate their
//! archive size into the scan total which later drives progress
//! reporting. Entries without a matching archive, or whose size cannot be
//! read, are dropped silently; a failure to iterate the books directory
//! itself is fatal and discards the whole candidate list.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, error, warn};

use crate::catalog::{CatalogEntry, CatalogSource};
use crate::utils::io_utils::find_file_by_stem;
use crate::Result;

/// Extension marking an index-descriptor entry inside the catalog.
pub const INDEX_DESCRIPTOR_EXT: &str = "inp";

/// Result of scanning a catalog against a books directory.
///
/// Every entry has a matching archive under the books root at scan time,
/// and `total_size` is the exact sum of those archives' sizes.
#[derive(Debug, Clone, Default)]
pub struct ScanList {
    /// Surviving index-descriptor entries, in catalog order
    pub entries: Vec<CatalogEntry>,
    /// Sum of the matched archives' sizes in bytes
    pub total_size: u64,
}

/// Scans the catalog at `catalog_path` against `books_path`.
///
/// The scan checks `cancel` between entries; once the flag is observed the
/// prefix collected so far is returned as a partial result, not an error.
pub fn collect_files(
    source: &dyn CatalogSource,
    catalog_path: &Path,
    books_path: &Path,
    cancel: &AtomicBool,
) -> Result<ScanList> {
    let listed = source.list_entries(catalog_path)?;
    let mut scan = ScanList::default();

    for entry in listed {
        if cancel.load(Ordering::Relaxed) {
            break;
        }
        let name = Path::new(&entry.name);
        if name.extension().and_then(|e| e.to_str()) != Some(INDEX_DESCRIPTOR_EXT) {
            continue;
        }
        let Some(stem) = name.file_stem() else {
            continue;
        };
        let matched = match find_file_by_stem(books_path, stem) {
            Ok(found) => found,
            Err(e) => {
                // A partial directory scan is never trusted.
                error!("collect_files: {}", e);
                return Err(e);
            },
        };
        let Some(matched) = matched else {
            debug!("collect_files: no archive for {}", entry.name);
            continue;
        };
        match fs::metadata(&matched) {
            Ok(meta) => {
                scan.total_size += meta.len();
                scan.entries.push(entry);
            },
            Err(e) => {
                warn!("collect_files: {}: {}", matched.display(), e);
            },
        }
    }
    Ok(scan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ZipCatalog;
    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn write_catalog(dir: &Path, names: &[&str]) -> PathBuf {
        let path = dir.join("catalog.inpx");
        let mut writer = ZipWriter::new(File::create(&path).unwrap());
        for name in names {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(b"dummy\r\n").unwrap();
        }
        writer.finish().unwrap();
        path
    }

    fn no_cancel() -> AtomicBool {
        AtomicBool::new(false)
    }

    #[test]
    fn keeps_matched_descriptors_and_sums_sizes() {
        let dir = tempfile::tempdir().unwrap();
        let books = dir.path().join("books");
        std::fs::create_dir(&books).unwrap();
        std::fs::write(books.join("arch1.zip"), vec![0u8; 100]).unwrap();
        std::fs::write(books.join("arch2.zip"), vec![0u8; 250]).unwrap();
        let catalog = write_catalog(dir.path(), &["arch1.inp", "arch2.inp"]);

        let scan = collect_files(&ZipCatalog::new(), &catalog, &books, &no_cancel()).unwrap();
        assert_eq!(scan.entries.len(), 2);
        assert_eq!(scan.total_size, 350);
    }

    #[test]
    fn drops_non_descriptor_entries() {
        let dir = tempfile::tempdir().unwrap();
        let books = dir.path().join("books");
        std::fs::create_dir(&books).unwrap();
        std::fs::write(books.join("arch1.zip"), vec![0u8; 10]).unwrap();
        let catalog = write_catalog(dir.path(), &["arch1.inp", "collection.info", "version.info"]);

        let scan = collect_files(&ZipCatalog::new(), &catalog, &books, &no_cancel()).unwrap();
        assert_eq!(scan.entries.len(), 1);
        assert_eq!(scan.entries[0].name, "arch1.inp");
    }

    #[test]
    fn drops_unmatched_descriptors_silently() {
        let dir = tempfile::tempdir().unwrap();
        let books = dir.path().join("books");
        std::fs::create_dir(&books).unwrap();
        std::fs::write(books.join("present.zip"), vec![0u8; 42]).unwrap();
        let catalog = write_catalog(dir.path(), &["present.inp", "absent.inp"]);

        let scan = collect_files(&ZipCatalog::new(), &catalog, &books, &no_cancel()).unwrap();
        assert_eq!(scan.entries.len(), 1);
        assert_eq!(scan.total_size, 42);
    }

    #[test]
    fn unreadable_books_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = write_catalog(dir.path(), &["arch1.inp"]);
        let missing = dir.path().join("no-such-dir");

        let result = collect_files(&ZipCatalog::new(), &catalog, &missing, &no_cancel());
        assert!(result.is_err());
    }

    #[test]
    fn cancellation_yields_partial_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let books = dir.path().join("books");
        std::fs::create_dir(&books).unwrap();
        std::fs::write(books.join("arch1.zip"), vec![0u8; 5]).unwrap();
        let catalog = write_catalog(dir.path(), &["arch1.inp"]);

        let cancelled = AtomicBool::new(true);
        let scan = collect_files(&ZipCatalog::new(), &catalog, &books, &cancelled).unwrap();
        assert!(scan.entries.is_empty());
        assert_eq!(scan.total_size, 0);
    }
}
