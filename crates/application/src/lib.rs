//! Restpad Application - Stores, use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for external dependencies)
//! - The environment variable store
//! - `{{variable}}` resolution
//! - Use case orchestration over request history
//! - Application-level error classification

pub mod environment_store;
pub mod error;
pub mod ports;
pub mod use_cases;
pub mod variable_resolver;

pub use environment_store::{EnvironmentStore, VARIABLES_STORAGE_KEY};
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{Clock, HistorySource, HistorySourceError, KeyValueStore, Notifier, StorageError};
pub use use_cases::{
    QueryHistory, QueryHistoryInput, QueryHistoryOutput, RecordRequest, RecordRequestInput,
};
