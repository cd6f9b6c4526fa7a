//! Filesystem-backed blob store.
//!
//! Logical paths are resolved relative to a root directory.  Writes go to a
//! uniquely named sibling temp file which is flushed and then renamed over
//! the target, so a crash or I/O fault mid-write never leaves a truncated
//! config behind.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use super::{BlobStore, StorageError};

/// A [`BlobStore`] over a directory on disk.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Creates a store rooted at `root`.  The directory is created lazily on
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a logical path.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl BlobStore for FsBlobStore {
    fn blob_exists(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }

    fn read_blob(&self, path: &Path) -> Result<Vec<u8>, StorageError> {
        let full = self.resolve(path);
        match fs::read(&full) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::NotFound(full)),
            Err(source) => Err(StorageError::Io { path: full, source }),
        }
    }

    fn write_blob(&self, path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
        let full = self.resolve(path);

        // Ensure directory exists before writing.
        let dir = full.parent().unwrap_or(&self.root).to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            path: dir.clone(),
            source,
        })?;

        let file_name = full
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let tmp = dir.join(format!(".{file_name}.{}.tmp", Uuid::new_v4()));

        replace_via(tmp, full, bytes)
    }
}

/// Writes `bytes` to `tmp` and renames it over `target`.  On any failure the
/// temp file is discarded and `target` is untouched.
fn replace_via(tmp: PathBuf, target: PathBuf, bytes: &[u8]) -> Result<(), StorageError> {
    if let Err(source) = write_synced(&tmp, bytes) {
        discard_temp(&tmp);
        return Err(StorageError::Io { path: tmp, source });
    }
    if let Err(source) = fs::rename(&tmp, &target) {
        discard_temp(&tmp);
        return Err(StorageError::Io { path: target, source });
    }

    debug!(path = %target.display(), len = bytes.len(), "blob written");
    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn discard_temp(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != ErrorKind::NotFound {
            warn!(path = %path.display(), "failed to remove temp file: {e}");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("theremin_fs_test_{}", Uuid::new_v4()))
    }

    #[test]
    fn test_missing_blob_does_not_exist() {
        let store = FsBlobStore::new(temp_root());
        assert!(!store.blob_exists(Path::new("synth_config.json")));
    }

    #[test]
    fn test_read_missing_blob_returns_not_found() {
        let store = FsBlobStore::new(temp_root());
        let result = store.read_blob(Path::new("synth_config.json"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_write_creates_directories_and_reads_back() {
        // Arrange
        let root = temp_root();
        let store = FsBlobStore::new(&root);
        let path = Path::new("nested/dir/synth_config.json");

        // Act
        store.write_blob(path, b"{\"a\":1}").expect("write");

        // Assert
        assert!(store.blob_exists(path));
        assert_eq!(store.read_blob(path).unwrap(), b"{\"a\":1}");

        // Cleanup
        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_write_replaces_previous_content_and_leaves_no_temp_files() {
        // Arrange
        let root = temp_root();
        let store = FsBlobStore::new(&root);
        let path = Path::new("synth_config.json");
        store.write_blob(path, b"first, and longer than the second").unwrap();

        // Act
        store.write_blob(path, b"second").unwrap();

        // Assert
        assert_eq!(store.read_blob(path).unwrap(), b"second");
        let entries: Vec<_> = fs::read_dir(&root).unwrap().collect();
        assert_eq!(entries.len(), 1, "only the target file must remain");

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_failed_temp_write_keeps_previous_content() {
        // Arrange: a directory squats on the temp path, so creating it fails
        let root = temp_root();
        let store = FsBlobStore::new(&root);
        let path = Path::new("synth_config.json");
        store.write_blob(path, b"previous").unwrap();
        let tmp = root.join(".synth_config.json.blocked.tmp");
        fs::create_dir_all(&tmp).unwrap();

        // Act
        let result = replace_via(tmp.clone(), store.resolve(path), b"new");

        // Assert
        assert!(matches!(result, Err(StorageError::Io { path, .. }) if path == tmp));
        assert_eq!(store.read_blob(path).unwrap(), b"previous");

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_failed_rename_onto_directory_leaves_it_and_no_temp_files() {
        // Arrange: the target path is a directory, so the rename must fail
        let root = temp_root();
        let store = FsBlobStore::new(&root);
        let path = Path::new("synth_config.json");
        fs::create_dir_all(root.join(path).join("occupied")).unwrap();

        // Act
        let result = store.write_blob(path, b"new");

        // Assert
        assert!(matches!(result, Err(StorageError::Io { .. })));
        assert!(root.join(path).join("occupied").is_dir());
        let leftovers = fs::read_dir(&root)
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0, "temp file must be cleaned up");

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_directory_at_path_is_not_a_blob() {
        let root = temp_root();
        fs::create_dir_all(root.join("synth_config.json")).unwrap();
        let store = FsBlobStore::new(&root);

        assert!(!store.blob_exists(Path::new("synth_config.json")));

        fs::remove_dir_all(&root).ok();
    }
}
