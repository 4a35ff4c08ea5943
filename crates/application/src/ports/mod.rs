//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod clock;
mod history_source;
mod key_value_store;
mod notifier;

pub use clock::Clock;
pub use history_source::{HistorySource, HistorySourceError};
pub use key_value_store::{KeyValueStore, StorageError};
pub use notifier::Notifier;
