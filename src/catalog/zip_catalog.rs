//! Zip-backed implementation of the catalog capability.
//!
//! INPX catalogs are zip containers in practice. Each call opens the
//! archive afresh, so one `ZipCatalog` value can serve concurrent
//! extractions from multiple worker threads without shared state.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::catalog::{CatalogEntry, CatalogSource};
use crate::{BaseError, Result};

/// Catalog source reading zip containers with the `zip` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipCatalog;

impl ZipCatalog {
    pub fn new() -> Self {
        Self
    }

    fn open(catalog_path: &Path) -> Result<ZipArchive<BufReader<File>>> {
        let file = File::open(catalog_path)?;
        Ok(ZipArchive::new(BufReader::new(file))?)
    }
}

impl CatalogSource for ZipCatalog {
    fn list_entries(&self, catalog_path: &Path) -> Result<Vec<CatalogEntry>> {
        let mut archive = Self::open(catalog_path)?;
        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let entry = archive.by_index_raw(i)?;
            if entry.is_dir() {
                continue;
            }
            entries.push(CatalogEntry {
                name: entry.name().to_string(),
                locator: i as u64,
            });
        }
        Ok(entries)
    }

    fn extract_entry(
        &self,
        catalog_path: &Path,
        dest_dir: &Path,
        entry: &CatalogEntry,
    ) -> Result<PathBuf> {
        let mut archive = Self::open(catalog_path)?;
        let index = usize::try_from(entry.locator)
            .map_err(|_| BaseError::entry_not_found(&entry.name))?;
        if index >= archive.len() {
            return Err(BaseError::entry_not_found(&entry.name));
        }
        let mut zipped = archive.by_index(index)?;

        // Entry names may carry container-internal directories; flatten to
        // the file name for the scratch copy.
        let file_name = Path::new(zipped.name())
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| BaseError::entry_not_found(&entry.name))?;
        let dest = dest_dir.join(file_name);

        let mut out = File::create(&dest)?;
        io::copy(&mut zipped, &mut out)?;
        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn write_catalog(dir: &Path, entries: &[(&str, &[u8])]) -> PathBuf {
        let path = dir.join("catalog.inpx");
        let file = File::create(&path).unwrap();
        let mut writer = ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        for (name, data) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    #[test]
    fn lists_file_entries_with_locators() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = write_catalog(
            dir.path(),
            &[("one.inp", b"a"), ("two.inp", b"b"), ("collection.info", b"c")],
        );

        let entries = ZipCatalog::new().list_entries(&catalog).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].name, "one.inp");
        assert_eq!(entries[1].locator, 1);
    }

    #[test]
    fn extracts_entry_to_scratch_dir() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = write_catalog(dir.path(), &[("books.inp", b"payload")]);
        let scratch = tempfile::tempdir().unwrap();

        let source = ZipCatalog::new();
        let entries = source.list_entries(&catalog).unwrap();
        let extracted = source
            .extract_entry(&catalog, scratch.path(), &entries[0])
            .unwrap();

        assert_eq!(extracted.file_name().unwrap(), "books.inp");
        assert_eq!(std::fs::read(&extracted).unwrap(), b"payload");
    }

    #[test]
    fn missing_catalog_is_an_error() {
        let result = ZipCatalog::new().list_entries(Path::new("/nonexistent/catalog.inpx"));
        assert!(result.is_err());
    }
}
