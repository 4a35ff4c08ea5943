//! Restpad Domain - Core data types
//!
//! This crate defines the data model of the Restpad REST playground:
//! environments with their variable bindings, recorded requests, and the
//! pure filter/group pipeline over request history.
//! All types here are pure Rust with no I/O dependencies.

pub mod environment;
pub mod error;
pub mod history;
pub mod id;
pub mod notification;
pub mod request;

pub use environment::{VariableBindings, VariablesData};
pub use error::{DomainError, DomainResult};
pub use history::{
    DateGroup, FilterCriteria, HistoryStats, Page, RecordHeader, RequestRecord, filter_requests,
    group_requests_by_date, paginate,
};
pub use id::generate_id;
pub use notification::Notification;
pub use request::{HttpMethod, RequestStatus};
