//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The request status is not one of `ok`, `error` or `in process`.
    #[error("unknown request status: {0}")]
    UnknownStatus(String),

    /// A response code was given for a request that has not completed,
    /// or is missing for one that has.
    #[error("inconsistent response code: {0}")]
    InconsistentResponseCode(String),

    /// A query string could not be decoded into filter criteria.
    #[error("invalid filter query: {0}")]
    InvalidFilterQuery(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
