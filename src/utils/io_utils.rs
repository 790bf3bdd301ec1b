//! I/O utility functions for file and directory operations.
//!
//! This module provides helpers for reading whole files into memory and
//! for the single-level stem-match lookup that pairs catalog entries with
//! physical book archives.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::Result;

/// Reads all bytes from a file path.
pub fn bytes_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// Finds the first file directly inside `dir` whose stem equals `stem`.
///
/// The scan is single-level (no recursion) and stops at the first match.
/// Returns `Ok(None)` when no file matches; a failure to iterate the
/// directory itself is an error.
pub fn find_file_by_stem(dir: &Path, stem: &std::ffi::OsStr) -> Result<Option<PathBuf>> {
    for entry in WalkDir::new(dir).follow_links(true).max_depth(1) {
        let entry = entry.map_err(|e| {
            crate::BaseError::general_error(format!(
                "Walk directory error: {} ({})",
                e,
                dir.display()
            ))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().file_stem() == Some(stem) {
            return Ok(Some(entry.path().to_path_buf()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use std::fs;

    #[test]
    fn finds_file_regardless_of_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("books1.zip"), b"z").unwrap();
        fs::write(dir.path().join("other.zip"), b"z").unwrap();

        let found = find_file_by_stem(dir.path(), OsStr::new("books1"))
            .unwrap()
            .unwrap();
        assert_eq!(found.file_name().unwrap(), "books1.zip");
    }

    #[test]
    fn missing_stem_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("books1.zip"), b"z").unwrap();
        assert!(
            find_file_by_stem(dir.path(), OsStr::new("absent"))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn does_not_recurse_into_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("deep.zip"), b"z").unwrap();
        assert!(
            find_file_by_stem(dir.path(), OsStr::new("deep"))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn unreadable_directory_is_an_error() {
        assert!(find_file_by_stem(Path::new("/nonexistent/dir"), OsStr::new("x")).is_err());
    }
}
