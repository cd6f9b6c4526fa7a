//! Application layer: the config store use cases.
//!
//! Depends on `theremin_core` for the model and codec, and on the
//! [`crate::infrastructure::storage::BlobStore`] trait for persistence.

pub mod config_store;

pub use config_store::{ConfigStore, LoadError, SaveError};
