//! Storage infrastructure: the blob store the config is persisted in.
//!
//! The store sees storage as an opaque byte blob at a single path.  The
//! [`BlobStore`] trait is that contract; this module provides:
//!
//! - [`fs::FsBlobStore`] – files under a root directory, replaced atomically.
//! - [`memory::MemoryBlobStore`] – an in-process map for tests and for hosts
//!   that persist through their own mechanism.
//! - [`platform`] – where the config file lives on each OS.

use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod fs;
pub mod memory;
pub mod platform;

/// Error type for blob storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Nothing is stored at the path.
    #[error("no blob stored at {}", .0.display())]
    NotFound(PathBuf),

    /// An I/O error occurred reading or writing the blob.
    #[error("I/O error accessing {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Byte-addressable blob storage keyed by path.
///
/// Implementations must make [`write_blob`](BlobStore::write_blob)
/// all-or-nothing: when it returns an error, a subsequent
/// [`read_blob`](BlobStore::read_blob) observes the previous content.
#[cfg_attr(test, mockall::automock)]
pub trait BlobStore {
    /// Returns `true` if a blob is stored at `path`.  Never fails.
    fn blob_exists(&self, path: &Path) -> bool;

    /// Reads the full blob at `path`.
    ///
    /// # Errors
    ///
    /// [`StorageError::NotFound`] if nothing is stored there, or
    /// [`StorageError::Io`] for any other fault.
    fn read_blob(&self, path: &Path) -> Result<Vec<u8>, StorageError>;

    /// Replaces the blob at `path` with `bytes`.
    ///
    /// # Errors
    ///
    /// [`StorageError::Io`] if the write could not be completed.
    fn write_blob(&self, path: &Path, bytes: &[u8]) -> Result<(), StorageError>;
}
