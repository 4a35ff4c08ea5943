//! Application use cases (business logic orchestration).

mod query_history;
mod record_request;

pub use query_history::*;
pub use record_request::*;
