//! Request history: records and the filter/group pipeline that prepares
//! them for display.

mod filter;
mod group;
mod page;
mod record;
mod stats;

pub use filter::{FilterCriteria, MATCH_ALL, filter_requests, parse_calendar_date};
pub use group::{DateGroup, group_requests_by_date};
pub use page::{DEFAULT_PER_PAGE, Page, paginate};
pub use record::{DATE_FORMAT, RecordHeader, RequestRecord, TIME_FORMAT, size_label};
pub use stats::HistoryStats;
