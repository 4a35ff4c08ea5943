//! Request status classification

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// Outcome classification of a recorded request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    /// The request completed with a successful response code.
    #[serde(rename = "ok")]
    Ok,
    /// The request completed with an error response code.
    #[serde(rename = "error")]
    Error,
    /// The request was issued but has not completed.
    #[serde(rename = "in process")]
    InProcess,
}

impl RequestStatus {
    /// Returns all statuses in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Ok, Self::Error, Self::InProcess]
    }

    /// Returns the stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Error => "error",
            Self::InProcess => "in process",
        }
    }

    /// Whether a response code is carried by records with this status.
    #[must_use]
    pub const fn has_response_code(self) -> bool {
        matches!(self, Self::Ok | Self::Error)
    }

    /// Classifies a completed response by its code.
    #[must_use]
    pub const fn from_response_code(code: u16) -> Self {
        if code >= 200 && code < 400 {
            Self::Ok
        } else {
            Self::Error
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::UnknownStatus(s.to_string()))
    }
}
