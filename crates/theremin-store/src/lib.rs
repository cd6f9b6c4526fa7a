//! # theremin-store
//!
//! Persists the theremin axis-mapping [`Config`](theremin_core::Config) at a
//! single well-known location.
//!
//! ```rust
//! use theremin_store::{ConfigStore, LoadError, MemoryBlobStore};
//! use theremin_core::Config;
//!
//! let store = ConfigStore::new(MemoryBlobStore::new(), "synth_config.json");
//! assert!(!store.exists());
//! assert!(matches!(store.load(), Err(LoadError::NotFound(_))));
//!
//! store.save(&Config::default()).unwrap();
//! assert_eq!(store.load().unwrap(), Config::default());
//! ```

pub mod application;
pub mod infrastructure;

pub use application::{ConfigStore, LoadError, SaveError};
pub use infrastructure::storage::fs::FsBlobStore;
pub use infrastructure::storage::memory::MemoryBlobStore;
pub use infrastructure::storage::{BlobStore, StorageError};
