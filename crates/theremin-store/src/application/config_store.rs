//! The config store: bridge between one stored blob and a validated [`Config`].
//!
//! Each operation is an independent transaction against the [`BlobStore`];
//! nothing is cached between calls, so a `load` right after a `save` always
//! observes the bytes just written.
//!
//! ```text
//! exists()  ──► blob_exists(path)
//! load()    ──► read_blob(path) ──► decode_config ──► Config (validated)
//! save(cfg) ──► validate ──► encode_config ──► write_blob(path)
//! ```
//!
//! The store does not serialize concurrent callers.  Hosts that may save
//! from more than one place must route saves through a single owner.

use std::path::{Path, PathBuf};

use theremin_core::document::{decode_config, encode_config, DocumentError, DocumentFormat};
use theremin_core::{Config, ValidationError};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::infrastructure::storage::fs::FsBlobStore;
use crate::infrastructure::storage::platform::{self, PlatformError};
use crate::infrastructure::storage::{BlobStore, StorageError};

/// Error type for [`ConfigStore::load`].
#[derive(Debug, Error)]
pub enum LoadError {
    /// No config has been stored yet.  Normal on first run.
    #[error("no config stored at {}", .0.display())]
    NotFound(PathBuf),

    /// The stored bytes are not a well-formed JSON object.
    #[error("malformed config document: {0}")]
    MalformedDocument(String),

    /// The document is well-formed but a required key is absent.
    #[error("config is missing required field {0:?}")]
    MissingField(String),

    /// A field is present but violates an invariant.
    #[error(transparent)]
    InvalidValue(#[from] ValidationError),

    /// The storage collaborator failed for a reason other than absence.
    #[error("failed to read config at {}: {source}", .path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: StorageError,
    },
}

impl From<DocumentError> for LoadError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::Malformed(reason) | DocumentError::Encode(reason) => {
                LoadError::MalformedDocument(reason)
            }
            DocumentError::MissingField(name) => LoadError::MissingField(name),
            DocumentError::InvalidValue(e) => LoadError::InvalidValue(e),
        }
    }
}

/// Error type for [`ConfigStore::save`].
#[derive(Debug, Error)]
pub enum SaveError {
    /// The config violates an invariant; nothing was written.
    #[error(transparent)]
    InvalidValue(#[from] ValidationError),

    /// The config could not be serialized; nothing was written.
    #[error("failed to serialize config: {0}")]
    Serialize(String),

    /// The storage collaborator failed; the previous content is intact.
    #[error("failed to write config to {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: StorageError,
    },
}

impl From<DocumentError> for SaveError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::InvalidValue(e) => SaveError::InvalidValue(e),
            other => SaveError::Serialize(other.to_string()),
        }
    }
}

/// Reads and writes the axis-mapping config at one well-known path.
#[derive(Debug, Clone)]
pub struct ConfigStore<S> {
    storage: S,
    path: PathBuf,
    format: DocumentFormat,
}

impl<S: BlobStore> ConfigStore<S> {
    /// Creates a store for `path` inside `storage`, using the default
    /// document format.
    pub fn new(storage: S, path: impl Into<PathBuf>) -> Self {
        Self {
            storage,
            path: path.into(),
            format: DocumentFormat::default(),
        }
    }

    /// Replaces the document format (wave-shape key naming).
    pub fn with_format(mut self, format: DocumentFormat) -> Self {
        self.format = format;
        self
    }

    /// The well-known path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> &DocumentFormat {
        &self.format
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns `true` if a config blob is currently stored.
    pub fn exists(&self) -> bool {
        self.storage.blob_exists(&self.path)
    }

    /// Loads and validates the stored config.
    ///
    /// On success every invariant of [`Config`] holds; callers never need to
    /// re-validate.
    ///
    /// # Errors
    ///
    /// - [`LoadError::NotFound`] if nothing is stored.
    /// - [`LoadError::MalformedDocument`], [`LoadError::MissingField`] or
    ///   [`LoadError::InvalidValue`] if the stored document is rejected.
    /// - [`LoadError::ReadFailure`] for any other storage fault.
    pub fn load(&self) -> Result<Config, LoadError> {
        let bytes = self.storage.read_blob(&self.path).map_err(|e| match e {
            StorageError::NotFound(_) => LoadError::NotFound(self.path.clone()),
            source @ StorageError::Io { .. } => LoadError::ReadFailure {
                path: self.path.clone(),
                source,
            },
        })?;

        let config = decode_config(&bytes, &self.format).map_err(|e| {
            warn!(path = %self.path.display(), "rejected stored config: {e}");
            LoadError::from(e)
        })?;

        debug!(
            path = %self.path.display(),
            device_type = %config.device_type,
            "config loaded"
        );
        Ok(config)
    }

    /// Loads the stored config, or returns [`Config::default`] if none has
    /// been stored yet.  Nothing is written.
    ///
    /// # Errors
    ///
    /// Every [`LoadError`] other than [`LoadError::NotFound`] is returned
    /// unchanged.
    pub fn load_or_default(&self) -> Result<Config, LoadError> {
        match self.load() {
            Err(LoadError::NotFound(path)) => {
                info!(path = %path.display(), "no stored config, using defaults");
                Ok(Config::default())
            }
            other => other,
        }
    }

    /// Validates `config` and replaces the stored document with it.
    ///
    /// # Errors
    ///
    /// - [`SaveError::InvalidValue`] if `config` violates an invariant.
    /// - [`SaveError::WriteFailure`] if storage rejects the write; the
    ///   previously stored document is left intact.
    pub fn save(&self, config: &Config) -> Result<(), SaveError> {
        let bytes = encode_config(config, &self.format)?;

        self.storage
            .write_blob(&self.path, &bytes)
            .map_err(|source| {
                warn!(path = %self.path.display(), "config write failed: {source}");
                SaveError::WriteFailure {
                    path: self.path.clone(),
                    source,
                }
            })?;

        debug!(path = %self.path.display(), len = bytes.len(), "config saved");
        Ok(())
    }
}

impl ConfigStore<FsBlobStore> {
    /// Opens the store at the platform-appropriate config location
    /// (see [`platform`]).
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NoPlatformConfigDir`] if the location cannot
    /// be determined.
    pub fn open_default() -> Result<Self, PlatformError> {
        let dir = platform::config_dir()?;
        Ok(Self::new(FsBlobStore::new(dir), platform::CONFIG_FILE_NAME))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
