//! Request history port

use async_trait::async_trait;
use restpad_domain::RequestRecord;

/// Errors that can occur while accessing request history.
#[derive(Debug, thiserror::Error)]
pub enum HistorySourceError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored history could not be decoded.
    #[error("corrupt history: {0}")]
    Corrupt(String),

    /// The history backend cannot be reached.
    #[error("history unavailable: {0}")]
    Unavailable(String),
}

/// Supplier and sink of recorded requests.
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Loads all records, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be read or decoded.
    async fn load(&self) -> Result<Vec<RequestRecord>, HistorySourceError>;

    /// Stores a new record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    async fn append(&self, record: RequestRecord) -> Result<(), HistorySourceError>;

    /// Removes all records.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be written.
    async fn clear(&self) -> Result<(), HistorySourceError>;
}
