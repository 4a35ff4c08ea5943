//! Durable key-value channel port

use std::sync::Arc;

/// Errors raised by a key-value channel.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error while reading or writing a value.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The channel cannot be used at all (disabled, not initialized, ...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The value does not fit in the channel.
    #[error("storage quota exceeded for key '{key}'")]
    QuotaExceeded {
        /// Key being written.
        key: String,
    },
}

/// Synchronous string key-value storage.
///
/// Writes replace the whole value stored under a key. Implementations use
/// interior mutability so a channel can be shared.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value under `key`, or `None` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes the value under `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
