//! Build orchestrator: turns a scanned catalog into a collection database.
//!
//! [`CollectionBuilder`] drives the whole import: `scan` pairs catalog
//! entries with book archives, `build` processes each surviving entry on a
//! bounded worker pool and persists the resulting collection, `cancel`
//! requests cooperative cancellation from any thread.
//!
//! Each worker unit re-locates its archive (it may have disappeared since
//! the scan), then runs two subtasks concurrently: hashing the archive
//! contents, and extracting plus parsing its index descriptor. Both join
//! before the unit appends one [`FileRecord`] to the shared collection,
//! bumps the processed-bytes counter and reports progress. Cancellation
//! stops dispatch but never aborts a running unit, and the database is
//! written even after a cancelled run so a partial import is preserved.
//!
//! # Examples
//!
//! ```no_run
//! use inpxbase::builder::{BuildConfig, CollectionBuilder};
//! use std::path::Path;
//!
//! # fn main() -> inpxbase::Result<()> {
//! let mut builder = CollectionBuilder::new(BuildConfig::default());
//! builder.set_progress_callback(Box::new(|processed, total| {
//!     println!("Progress: {}/{} bytes", processed, total);
//! }));
//! builder.scan(
//!     Path::new("/path/to/catalog.inpx"),
//!     Path::new("/path/to/books"),
//!     "my-collection",
//! )?;
//! let base_path = builder.build()?;
//! println!("Database written to {}", base_path.display());
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::builder::scanner::{self, ScanList};
use crate::catalog::{CatalogEntry, CatalogSource, ZipCatalog};
use crate::collection::{BookRecord, Collection, FileRecord};
use crate::digest::{Blake3Hasher, FileHasher};
use crate::inp;
use crate::storage::base_writer::write_base;
use crate::utils::io_utils::{bytes_from_file, find_file_by_stem};
use crate::utils::progress_report::ProgressFn;
use crate::{BaseError, Result};

/// Configuration for building a collection database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Root directory collections are written under; the database lands at
    /// `<collections_dir>/<collection name>/base`
    pub collections_dir: PathBuf,
    /// Worker pool size; values below 1 are treated as 1
    pub thread_count: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            collections_dir: default_collections_dir(),
            thread_count: 1,
        }
    }
}

impl BuildConfig {
    /// Loads a configuration from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| BaseError::invalid_data_format(format!("Config: {}", e)))
    }
}

/// The default per-user collections directory,
/// `~/.local/share/MyLibrary/Collections`.
pub fn default_collections_dir() -> PathBuf {
    PathBuf::from(shellexpand::tilde("~/.local/share/MyLibrary/Collections").into_owned())
}

/// Orchestrates scanning a catalog and building its collection database.
pub struct CollectionBuilder {
    config: BuildConfig,
    catalog: Box<dyn CatalogSource>,
    hasher: Box<dyn FileHasher>,
    cancel: AtomicBool,
    progress: Option<ProgressFn>,
    catalog_path: PathBuf,
    books_path: PathBuf,
    collection_name: String,
    scan_list: ScanList,
}

impl CollectionBuilder {
    /// Creates a builder with the default capabilities: zip catalog access
    /// and BLAKE3 hashing.
    pub fn new(config: BuildConfig) -> Self {
        Self::with_capabilities(config, Box::new(ZipCatalog::new()), Box::new(Blake3Hasher::new()))
    }

    /// Creates a builder with injected catalog and hashing capabilities.
    pub fn with_capabilities(
        config: BuildConfig,
        catalog: Box<dyn CatalogSource>,
        hasher: Box<dyn FileHasher>,
    ) -> Self {
        Self {
            config,
            catalog,
            hasher,
            cancel: AtomicBool::new(false),
            progress: None,
            catalog_path: PathBuf::new(),
            books_path: PathBuf::new(),
            collection_name: String::new(),
            scan_list: ScanList::default(),
        }
    }

    /// Sets the progress callback invoked by worker units with
    /// `(processed_bytes, total_bytes)`.
    pub fn set_progress_callback(&mut self, progress: ProgressFn) {
        self.progress = Some(progress);
    }

    /// Path the database will be written to, derived from the collection
    /// name passed to [`scan`](Self::scan).
    pub fn base_path(&self) -> PathBuf {
        self.config
            .collections_dir
            .join(&self.collection_name)
            .join("base")
    }

    /// Scans the catalog against the books directory and remembers the
    /// surviving entry list for [`build`](Self::build).
    ///
    /// Cancellation during the scan leaves a partial entry list; a failure
    /// to iterate the books directory discards the list entirely.
    pub fn scan(
        &mut self,
        catalog_path: &Path,
        books_path: &Path,
        collection_name: &str,
    ) -> Result<&ScanList> {
        if collection_name.is_empty() {
            return Err(BaseError::invalid_parameter("Collection name cannot be empty"));
        }
        self.catalog_path = catalog_path.to_path_buf();
        self.books_path = books_path.to_path_buf();
        self.collection_name = collection_name.to_string();
        self.scan_list =
            scanner::collect_files(self.catalog.as_ref(), catalog_path, books_path, &self.cancel)?;
        info!(
            "scan: {} entries, {} bytes total",
            self.scan_list.entries.len(),
            self.scan_list.total_size
        );
        Ok(&self.scan_list)
    }

    /// Processes every scanned entry and writes the collection database.
    ///
    /// Dispatches one worker unit per entry onto a pool of
    /// `thread_count` threads and drains the pool before serializing.
    /// The database is written even when the run was cancelled; the
    /// returned path points at the persisted file.
    pub fn build(&self) -> Result<PathBuf> {
        let threads = self.config.thread_count.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| BaseError::general_error(format!("Worker pool: {}", e)))?;

        let base: Mutex<Vec<FileRecord>> = Mutex::new(Vec::new());
        let processed = AtomicU64::new(0);
        let base_ref = &base;
        let processed_ref = &processed;

        pool.scope(|scope| {
            for entry in &self.scan_list.entries {
                if self.cancel.load(Ordering::Relaxed) {
                    break;
                }
                scope.spawn(move |_| self.process_entry(entry, base_ref, processed_ref));
            }
        });

        let files = base.into_inner().unwrap_or_else(|e| e.into_inner());
        let collection = Collection {
            books_root: self.books_path.clone(),
            files,
        };
        let path = self.base_path();
        // A cancelled run still persists whatever was appended so far.
        write_base(&path, &collection)?;
        info!(
            "build: {} of {} entries persisted to {}",
            collection.files.len(),
            self.scan_list.entries.len(),
            path.display()
        );
        Ok(path)
    }

    /// Requests cancellation. Idempotent and callable from any thread
    /// concurrently with [`build`](Self::build): no new units are
    /// dispatched once the flag is observed, while units already running
    /// finish normally.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
        self.hasher.cancel_all();
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// One worker unit: locate, hash and parse one catalog entry.
    fn process_entry(
        &self,
        entry: &CatalogEntry,
        base: &Mutex<Vec<FileRecord>>,
        processed: &AtomicU64,
    ) {
        if self.cancel.load(Ordering::Relaxed) {
            return;
        }
        let Some(stem) = Path::new(&entry.name).file_stem() else {
            return;
        };
        // The archive may have disappeared since the scan; that is a
        // silent drop, not an error.
        let found = match find_file_by_stem(&self.books_path, stem) {
            Ok(Some(path)) => path,
            Ok(None) => {
                debug!("process_entry: archive for {} is gone", entry.name);
                return;
            },
            Err(e) => {
                error!("process_entry: {}", e);
                self.cancel.store(true, Ordering::Relaxed);
                return;
            },
        };
        let size = match fs::metadata(&found) {
            Ok(meta) => meta.len(),
            Err(e) => {
                warn!("process_entry: {}: {}", found.display(), e);
                return;
            },
        };
        let rel_path = found
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        // Hashing and descriptor parsing are independent; join both before
        // the record becomes visible to anyone else.
        let (hash, books) = rayon::join(
            || self.hash_archive(&found),
            || self.parse_descriptor_entry(entry),
        );

        let record = FileRecord { rel_path, hash, books };
        {
            let mut guard = base.lock().unwrap_or_else(|e| e.into_inner());
            guard.push(record);
        }

        let done = processed.fetch_add(size, Ordering::Relaxed) + size;
        if let Some(report) = &self.progress {
            report(done, self.scan_list.total_size);
        }
    }

    /// Hash subtask. Failures degrade to an empty digest so one broken
    /// archive cannot abort the whole build.
    fn hash_archive(&self, path: &Path) -> String {
        match self.hasher.hash_file(path) {
            Ok(digest) => digest,
            Err(e) if e.is_user_interrupted() => {
                debug!("hash_archive: cancelled while hashing {}", path.display());
                String::new()
            },
            Err(e) => {
                warn!("hash_archive: {}: {}", path.display(), e);
                String::new()
            },
        }
    }

    /// Parse subtask. Extraction happens into a scratch directory removed
    /// on every exit path; failures degrade to an empty book list.
    fn parse_descriptor_entry(&self, entry: &CatalogEntry) -> Vec<BookRecord> {
        match self.try_parse_descriptor_entry(entry) {
            Ok(books) => books,
            Err(e) => {
                warn!("parse_descriptor_entry: {}: {}", entry.name, e);
                Vec::new()
            },
        }
    }

    fn try_parse_descriptor_entry(&self, entry: &CatalogEntry) -> Result<Vec<BookRecord>> {
        let scratch = tempfile::Builder::new().prefix("inpxbase-").tempdir()?;
        let extracted = self
            .catalog
            .extract_entry(&self.catalog_path, scratch.path(), entry)?;
        let data = bytes_from_file(&extracted)?;
        Ok(inp::parse_descriptor(&data, &self.cancel))
    }
}
