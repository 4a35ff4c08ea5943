//! Restpad Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus runtime configuration.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod serialization;

pub use adapters::{SystemClock, TracingNotifier};
pub use config::{AppConfig, ConfigError};
pub use persistence::{
    DEFAULT_HISTORY_LIMIT, FileHistoryRepository, FileKeyValueStore, InMemoryKeyValueStore,
};
pub use serialization::{
    SerializationError, from_json, from_json_bytes, to_json_stable, to_json_stable_bytes,
};
