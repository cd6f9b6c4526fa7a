//! In-memory blob store.
//!
//! Cloned handles share one map, so a test can keep a handle for inspection
//! while the store owns another.  Write faults can be injected to exercise
//! the all-or-nothing save path.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use super::{BlobStore, StorageError};

/// A [`BlobStore`] backed by a shared `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    blobs: HashMap<PathBuf, Vec<u8>>,
    fail_writes: bool,
    writes: u64,
}

impl MemoryBlobStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// When `fail` is `true`, every subsequent write fails with an I/O error
    /// and leaves stored content untouched.
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Returns a copy of the raw bytes stored at `path`.
    pub fn raw(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.lock().blobs.get(path.as_ref()).cloned()
    }

    /// Stores `bytes` at `path` directly, bypassing fault injection.
    pub fn insert_raw(&self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) {
        self.lock().blobs.insert(path.into(), bytes.into());
    }

    /// Number of successful writes since creation.
    pub fn write_count(&self) -> u64 {
        self.lock().writes
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock cannot leave the map half-updated:
        // every mutation is a single insert.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl BlobStore for MemoryBlobStore {
    fn blob_exists(&self, path: &Path) -> bool {
        self.lock().blobs.contains_key(path)
    }

    fn read_blob(&self, path: &Path) -> Result<Vec<u8>, StorageError> {
        self.lock()
            .blobs
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(path.to_path_buf()))
    }

    fn write_blob(&self, path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(StorageError::Io {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::Other, "injected write failure"),
            });
        }
        inner.blobs.insert(path.to_path_buf(), bytes.to_vec());
        inner.writes = inner.writes.saturating_add(1);
        Ok(())
    }
}
