//! Core data model for an imported collection.
//!
//! This module provides the in-memory representation of a collection built
//! from an INPX catalog: one [`FileRecord`] per matched book archive, each
//! holding the bibliographic [`BookRecord`]s parsed from its index
//! descriptor, aggregated into a [`Collection`] together with the books
//! root the collection was built against.

use std::path::PathBuf;

/// One bibliographic entry parsed from an index descriptor record.
///
/// All fields are stored exactly as the legacy positional format defines
/// them (see [`crate::inp`]); a record is immutable once parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookRecord {
    /// Path of the book inside its archive, base name plus optional extension
    pub path: String,
    /// Normalized author list ("Last First, Last First")
    pub author: String,
    /// Book title, verbatim
    pub title: String,
    /// Series name with the series index appended, if any
    pub series: String,
    /// Normalized genre list
    pub genre: String,
    /// Publication date, verbatim
    pub date: String,
}

/// One matched book archive with its parsed contents.
///
/// Created by a single worker unit during a build and appended to the
/// shared collection exactly once; never mutated afterward.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileRecord {
    /// Path of the archive relative to the books root (its file name)
    pub rel_path: String,
    /// Content hash digest of the archive, as a hex string
    pub hash: String,
    /// Books listed by the archive's index descriptor, in record order
    pub books: Vec<BookRecord>,
}

/// An ordered, append-only set of [`FileRecord`]s plus the books root
/// they were collected under.
///
/// This is the unit of serialization: [`crate::storage::encode_base`]
/// turns a `Collection` into the on-disk database and
/// [`crate::storage::decode_base`] turns it back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    /// The books directory this collection was built against
    pub books_root: PathBuf,
    /// One record per processed book archive, in completion order
    pub files: Vec<FileRecord>,
}

impl Collection {
    /// Creates an empty collection rooted at the given books directory.
    pub fn new<P: Into<PathBuf>>(books_root: P) -> Self {
        Self {
            books_root: books_root.into(),
            files: Vec::new(),
        }
    }

    /// Total number of books across all file records.
    pub fn book_count(&self) -> usize {
        self.files.iter().map(|f| f.books.len()).sum()
    }
}
