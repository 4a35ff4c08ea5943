//! Request classification types shared by history records and filters.

mod method;
mod status;

pub use method::HttpMethod;
pub use status::RequestStatus;
