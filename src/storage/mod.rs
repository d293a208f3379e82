//! Key-value persistence the cart mirrors itself into.
//!
//! The cart only ever needs `get`/`set` on a single namespaced key; values are
//! opaque strings (the cart writes JSON).

mod file;
mod memory;

use std::path::PathBuf;

use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors that can occur while reading or writing storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O failed at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to lock storage at '{path}': {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage unavailable: {message}")]
    Unavailable { message: String },
}

/// Synchronous key-value store.
///
/// Implementations must be safe to share between threads; the cart store
/// keeps one behind an `Arc`.
pub trait KeyValueStorage: Send + Sync {
    /// Returns `None` when nothing is stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces whatever is stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
