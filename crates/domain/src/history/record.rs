//! Request history record

use std::fmt;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::environment::VariableBindings;
use crate::error::{DomainError, DomainResult};
use crate::request::{HttpMethod, RequestStatus};

/// Calendar date format carried by records and filter boundaries.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time-of-day format carried by records.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// A header sent with a recorded request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RecordHeader {
    /// Header name.
    pub key: String,
    /// Header value.
    pub value: String,
}

impl RecordHeader {
    /// Creates a header pair.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// An immutable entry of the request history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRecord {
    /// Unique identifier.
    pub id: String,
    /// HTTP method used.
    pub method: HttpMethod,
    /// URL after variable substitution.
    pub url: String,
    /// Calendar date the request was created, `YYYY-MM-DD`.
    pub date: String,
    /// Time of day the request was created, `HH:MM:SS`.
    pub time: String,
    /// Round-trip duration in milliseconds.
    #[serde(default)]
    pub duration_ms: u64,
    /// Outcome classification.
    pub status: RequestStatus,
    /// Response code, present only for `ok` and `error` records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_code: Option<u16>,
    /// Request size label, e.g. `"512 B"`.
    #[serde(default)]
    pub request_size: String,
    /// Response size label, e.g. `"1.2 KB"`.
    #[serde(default)]
    pub response_size: String,
    /// Raw response body.
    #[serde(default)]
    pub response_body: String,
    /// Request headers in send order.
    #[serde(default)]
    pub headers: Vec<RecordHeader>,
    /// Request body after variable substitution.
    #[serde(default)]
    pub request_body: String,
    /// Variables that were substituted into the request.
    #[serde(default)]
    pub variables: VariableBindings,
}

impl RequestRecord {
    /// Creates a record stamped with the calendar date and time of `created_at`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InconsistentResponseCode`] when a response code
    /// is given for an `in process` record or missing for a completed one.
    pub fn new<Tz>(
        method: HttpMethod,
        url: impl Into<String>,
        created_at: &DateTime<Tz>,
        status: RequestStatus,
        response_code: Option<u16>,
    ) -> DomainResult<Self>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        if status.has_response_code() != response_code.is_some() {
            return Err(DomainError::InconsistentResponseCode(format!(
                "status '{status}' with response code {response_code:?}"
            )));
        }

        Ok(Self {
            id: crate::generate_id(),
            method,
            url: url.into(),
            date: created_at.format(DATE_FORMAT).to_string(),
            time: created_at.format(TIME_FORMAT).to_string(),
            duration_ms: 0,
            status,
            response_code,
            request_size: String::new(),
            response_size: String::new(),
            response_body: String::new(),
            headers: Vec::new(),
            request_body: String::new(),
            variables: VariableBindings::new(),
        })
    }

    /// Sets the duration.
    #[must_use]
    pub const fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Sets the request body and derives its size label.
    #[must_use]
    pub fn with_request_body(mut self, body: impl Into<String>) -> Self {
        self.request_body = body.into();
        self.request_size = size_label(self.request_body.len());
        self
    }

    /// Sets the response body and derives its size label.
    #[must_use]
    pub fn with_response_body(mut self, body: impl Into<String>) -> Self {
        self.response_body = body.into();
        self.response_size = size_label(self.response_body.len());
        self
    }

    /// Sets the request headers.
    #[must_use]
    pub fn with_headers(mut self, headers: Vec<RecordHeader>) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the substituted variables.
    #[must_use]
    pub fn with_variables(mut self, variables: VariableBindings) -> Self {
        self.variables = variables;
        self
    }

    /// Returns the duration as a display string.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_display(&self) -> String {
        match self.status {
            RequestStatus::InProcess => "-".to_string(),
            _ if self.duration_ms < 1000 => format!("{}ms", self.duration_ms),
            _ => format!("{:.1}s", self.duration_ms as f64 / 1000.0),
        }
    }
}

/// Formats a byte count as a size label (`B`, `KB` or `MB`).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn size_label(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}
