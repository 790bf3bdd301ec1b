//! Content hashing of book archives.
//!
//! The import pipeline only consumes a capability contract: hash the file
//! at a path into a digest string, and honor an out-of-band cancel-all.
//! [`Blake3Hasher`] is the default implementation, streaming the file in
//! fixed-size chunks so cancellation is observed without waiting for large
//! archives to finish.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{BaseError, Result};

/// Read granularity for streamed hashing. Cancellation is checked between
/// chunks.
const HASH_CHUNK_SIZE: usize = 64 * 1024;

/// Capability for hashing book archive contents.
pub trait FileHasher: Send + Sync {
    /// Computes the digest string of the file at `path`.
    fn hash_file(&self, path: &Path) -> Result<String>;

    /// Requests cancellation of every in-flight and future hash. Idempotent;
    /// a cancelled hasher stays cancelled.
    fn cancel_all(&self);
}

/// BLAKE3 file hasher with cooperative cancellation.
#[derive(Debug, Default)]
pub struct Blake3Hasher {
    cancel: AtomicBool,
}

impl Blake3Hasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FileHasher for Blake3Hasher {
    fn hash_file(&self, path: &Path) -> Result<String> {
        let mut file = File::open(path)?;
        let mut hasher = blake3::Hasher::new();
        let mut buf = [0u8; HASH_CHUNK_SIZE];
        loop {
            if self.cancel.load(Ordering::Relaxed) {
                return Err(BaseError::user_interrupted());
            }
            let read = file.read(&mut buf)?;
            if read == 0 {
                break;
            }
            hasher.update(&buf[..read]);
        }
        Ok(hasher.finalize().to_hex().to_string())
    }

    fn cancel_all(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn hashes_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.zip");
        File::create(&path).unwrap().write_all(b"contents").unwrap();

        let digest = Blake3Hasher::new().hash_file(&path).unwrap();
        assert_eq!(digest, blake3::hash(b"contents").to_hex().to_string());
    }

    #[test]
    fn cancelled_hasher_refuses_work() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.zip");
        File::create(&path).unwrap().write_all(b"contents").unwrap();

        let hasher = Blake3Hasher::new();
        hasher.cancel_all();
        let result = hasher.hash_file(&path);
        assert!(result.unwrap_err().is_user_interrupted());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let hasher = Blake3Hasher::new();
        assert!(hasher.hash_file(Path::new("/nonexistent/book.zip")).is_err());
    }
}
