//! Clock port for time-related operations

use chrono::{DateTime, Local};

/// Port for getting the current time.
///
/// Records derive their calendar date and time of day from this, so it
/// reports local time.
pub trait Clock: Send + Sync {
    /// Returns the current local timestamp.
    fn now(&self) -> DateTime<Local>;
}
