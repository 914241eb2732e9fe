//! Durable key-value storage for the serialized cart.
//!
//! The store keeps one JSON blob under one string key. Reads and writes are
//! synchronous, like a browser's `localStorage`.
//!
//! - [`MemoryStore`] - process-local map, for tests and throwaway sessions
//! - [`JsonFileStore`] - a single JSON file holding every key

mod file;
mod memory;

use std::path::PathBuf;

use thiserror::Error;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Errors that can occur when reading or writing storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value couldn't be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The backing file isn't a valid key-value document.
    #[error("Corrupt storage file {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The backend refused the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// String-keyed storage holding string values.
pub trait KeyValueStore {
    /// Read the value under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend can't be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value couldn't be durably written; the
    /// previous value is left in place.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}
