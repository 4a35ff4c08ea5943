//! Grouping of history records by calendar date.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::record::RequestRecord;

/// Records sharing one calendar date, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateGroup {
    /// The date string exactly as carried by the records.
    pub date: String,
    /// Records of that date.
    pub requests: Vec<RequestRecord>,
}

/// Buckets records by their `date` string.
///
/// Groups appear in the order their date is first seen; they are not
/// sorted. Dates are compared verbatim, without parsing.
#[must_use]
pub fn group_requests_by_date(records: &[RequestRecord]) -> Vec<DateGroup> {
    let mut groups: IndexMap<&str, Vec<RequestRecord>> = IndexMap::new();
    for record in records {
        groups
            .entry(record.date.as_str())
            .or_default()
            .push(record.clone());
    }

    groups
        .into_iter()
        .map(|(date, requests)| DateGroup {
            date: date.to_string(),
            requests,
        })
        .collect()
}
