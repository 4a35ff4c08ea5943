//! Application error types
//!
//! Errors from ports are classified once, where they are first caught, into
//! [`ApplicationError`]. Everything downstream (notifications, CLI output)
//! handles that single shape.

use restpad_domain::DomainError;
use thiserror::Error;

use crate::ports::{HistorySourceError, StorageError};

/// Classified application-level error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// A backing service or storage channel rejected the operation.
    #[error("{message} [{code}]")]
    Backend {
        /// Stable machine-readable code, e.g. `storage/io`.
        code: String,
        /// Human-readable detail.
        message: String,
    },

    /// Input or stored data failed validation.
    #[error("{message}")]
    Validation {
        /// Human-readable detail.
        message: String,
    },

    /// Anything that could not be classified.
    #[error("unknown error: {message}")]
    Unknown {
        /// Whatever detail was available.
        message: String,
    },
}

impl ApplicationError {
    /// Creates a backend error.
    #[must_use]
    pub fn backend(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates an unclassified error.
    #[must_use]
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
        }
    }

    /// Returns the human-readable detail, without the code.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Backend { message, .. }
            | Self::Validation { message }
            | Self::Unknown { message } => message,
        }
    }

    /// Returns the backend code, if this is a backend error.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Backend { code, .. } => Some(code),
            Self::Validation { .. } | Self::Unknown { .. } => None,
        }
    }
}

impl From<DomainError> for ApplicationError {
    fn from(error: DomainError) -> Self {
        Self::validation(error.to_string())
    }
}

impl From<StorageError> for ApplicationError {
    fn from(error: StorageError) -> Self {
        let code = match &error {
            StorageError::Io(_) => "storage/io",
            StorageError::Unavailable(_) => "storage/unavailable",
            StorageError::QuotaExceeded { .. } => "storage/quota-exceeded",
        };
        Self::backend(code, error.to_string())
    }
}

impl From<HistorySourceError> for ApplicationError {
    fn from(error: HistorySourceError) -> Self {
        match error {
            HistorySourceError::Io(e) => Self::backend("history/io", e.to_string()),
            HistorySourceError::Unavailable(message) => {
                Self::backend("history/unavailable", message)
            }
            HistorySourceError::Corrupt(message) => Self::validation(message),
        }
    }
}

impl From<serde_json::Error> for ApplicationError {
    fn from(error: serde_json::Error) -> Self {
        if error.is_io() {
            Self::unknown(error.to_string())
        } else {
            Self::validation(error.to_string())
        }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
