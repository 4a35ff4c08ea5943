//! History filtering by method, status and date range.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::record::{DATE_FORMAT, RequestRecord};
use crate::error::{DomainError, DomainResult};

/// Value that disables the method or status constraint.
pub const MATCH_ALL: &str = "all";

/// User-chosen constraints on which records are shown.
///
/// Field names match the history page query string
/// (`?method=GET&status=ok&dateFrom=2024-01-01&dateTo=2024-01-31`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Exact uppercase method, or `"all"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Exact status string, or `"all"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Inclusive lower date bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    /// Inclusive upper date bound, covering the whole day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
}

impl FilterCriteria {
    /// Creates criteria that match every record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to a method.
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Restricts to a status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the inclusive lower date bound.
    #[must_use]
    pub fn with_date_from(mut self, date: impl Into<String>) -> Self {
        self.date_from = Some(date.into());
        self
    }

    /// Sets the inclusive upper date bound.
    #[must_use]
    pub fn with_date_to(mut self, date: impl Into<String>) -> Self {
        self.date_to = Some(date.into());
        self
    }

    /// Parses criteria from a URL query string. A leading `?` is allowed,
    /// unknown keys are ignored and empty values count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidFilterQuery`] if the query is not valid
    /// `application/x-www-form-urlencoded` data.
    pub fn from_query(query: &str) -> DomainResult<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let parsed: Self = serde_urlencoded::from_str(query)
            .map_err(|e| DomainError::InvalidFilterQuery(e.to_string()))?;

        Ok(Self {
            method: parsed.method.filter(|v| !v.is_empty()),
            status: parsed.status.filter(|v| !v.is_empty()),
            date_from: parsed.date_from.filter(|v| !v.is_empty()),
            date_to: parsed.date_to.filter(|v| !v.is_empty()),
        })
    }

    /// Returns true if no constraint would be applied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        is_unconstrained(self.method.as_deref())
            && is_unconstrained(self.status.as_deref())
            && self.date_from.is_none()
            && self.date_to.is_none()
    }
}

/// Parses a calendar date.
///
/// Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp which is reduced to its
/// local calendar date.
#[must_use]
pub fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, DATE_FORMAT).ok().or_else(|| {
        DateTime::parse_from_rfc3339(input)
            .ok()
            .map(|dt| dt.with_timezone(&Local).date_naive())
    })
}

fn is_unconstrained(value: Option<&str>) -> bool {
    value.is_none_or(|v| v == MATCH_ALL)
}

/// Criteria with date boundaries parsed once.
struct Predicate<'a> {
    method: Option<&'a str>,
    status: Option<&'a str>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl<'a> Predicate<'a> {
    fn new(criteria: &'a FilterCriteria) -> Self {
        let exact = |value: &'a Option<String>| value.as_deref().filter(|v| *v != MATCH_ALL);
        Self {
            method: exact(&criteria.method),
            status: exact(&criteria.status),
            // An unparsable boundary is not applied.
            from: criteria.date_from.as_deref().and_then(parse_calendar_date),
            to: criteria.date_to.as_deref().and_then(parse_calendar_date),
        }
    }

    fn matches(&self, record: &RequestRecord) -> bool {
        self.method.is_none_or(|m| m == record.method.as_str())
            && self.status.is_none_or(|s| s == record.status.as_str())
            && self.matches_date(&record.date)
    }

    fn matches_date(&self, date: &str) -> bool {
        if self.from.is_none() && self.to.is_none() {
            return true;
        }
        // A record without a readable date cannot satisfy an active bound.
        let Some(date) = parse_calendar_date(date) else {
            return false;
        };
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// Returns the records matching every constraint in `criteria`, in input order.
#[must_use]
pub fn filter_requests(records: &[RequestRecord], criteria: &FilterCriteria) -> Vec<RequestRecord> {
    let predicate = Predicate::new(criteria);
    records
        .iter()
        .filter(|record| predicate.matches(record))
        .cloned()
        .collect()
}
