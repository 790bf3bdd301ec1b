//! # inpxbase - INPX Catalog Importer and Collection Database Builder
//!
//! This crate turns an INPX catalog archive plus a directory of book
//! archives into a single compact binary "collection database", the format
//! consumed by MyLibrary-style e-book collection managers.
//!
//! ## Features
//!
//! - **Catalog scanning**: list the catalog container, keep the
//!   index-descriptor entries and match each against a physical book
//!   archive by file stem
//! - **Concurrent import**: a bounded worker pool processes matched
//!   entries, hashing each archive and parsing its descriptor in parallel
//! - **Legacy descriptor parsing**: the positional CRLF/0x04 text format
//!   with its field-specific normalization rules, preserved as a
//!   compatibility surface
//! - **Binary database codec**: the little-endian length-prefixed layout,
//!   with both writer and reader halves
//! - **Progress and cancellation**: byte-level progress callbacks and
//!   cooperative, idempotent cancellation from any thread
//!
//! ## Quick Start
//!
//! ```no_run
//! use inpxbase::builder::{BuildConfig, CollectionBuilder};
//! use std::path::Path;
//!
//! # fn main() -> inpxbase::Result<()> {
//! let mut builder = CollectionBuilder::new(BuildConfig::default());
//! builder.scan(
//!     Path::new("/path/to/catalog.inpx"),
//!     Path::new("/path/to/books"),
//!     "my-collection",
//! )?;
//! let base_path = builder.build()?;
//! println!("Collection database: {}", base_path.display());
//! # Ok(())
//! # }
//! ```
//!
//! ### Reading a database back
//!
//! ```no_run
//! use inpxbase::storage::read_base;
//! use std::path::Path;
//!
//! # fn main() -> inpxbase::Result<()> {
//! let collection = read_base(Path::new("/path/to/Collections/my-collection/base"))?;
//! for file in &collection.files {
//!     println!("{}: {} books", file.rel_path, file.books.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The crate is organized into several key modules:
//!
//! - **Builder**: [`builder`] for the catalog scanner and the build
//!   orchestrator
//! - **Catalog access**: [`catalog`] for the container listing/extraction
//!   capability and its zip-backed implementation
//! - **Storage**: [`storage`] for the binary database writer and reader
//! - **Parsing**: [`inp`] for the index-descriptor record format
//! - **Hashing**: [`digest`] for the content-hash capability
//! - **Data model**: [`collection`] for records and the in-memory
//!   collection
//!
//! ## Error Handling
//!
//! All fallible operations return a [`Result<T>`] type, where errors are
//! represented by [`BaseError`]. The crate uses the `snafu` library for
//! ergonomic error handling with context and backtraces. Per-entry
//! problems during a build (a vanished archive, an unreadable descriptor)
//! are logged and degrade to empty values rather than aborting the whole
//! import; only a fatal scan failure or an output failure surfaces as an
//! error.

pub mod builder;
pub mod catalog;
pub mod collection;
pub mod digest;
pub mod error;
pub mod inp;
pub mod storage;
pub mod utils;

// Re-export commonly used types for convenience
pub use builder::{BuildConfig, CollectionBuilder, ScanList};
pub use catalog::{CatalogEntry, CatalogSource, ZipCatalog};
pub use collection::{BookRecord, Collection, FileRecord};
pub use digest::{Blake3Hasher, FileHasher};

// Re-export error types for convenience
pub use error::{BaseError, Result, snafu};
