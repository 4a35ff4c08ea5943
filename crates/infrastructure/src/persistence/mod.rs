//! Persistence adapters: key-value channels and request history.

mod history_repository;
mod key_value_store;
mod memory_store;

pub use history_repository::*;
pub use key_value_store::*;
pub use memory_store::*;
