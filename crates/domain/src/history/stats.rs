//! Basic analytics over history records.

use serde::{Deserialize, Serialize};

use super::record::RequestRecord;
use crate::request::{HttpMethod, RequestStatus};

/// Aggregate figures for a set of records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HistoryStats {
    /// Number of records.
    pub total: usize,
    /// Record count per status, for statuses that occur.
    pub by_status: Vec<(RequestStatus, usize)>,
    /// Record count per method, for methods that occur.
    pub by_method: Vec<(HttpMethod, usize)>,
    /// Mean duration of completed records.
    pub average_duration_ms: Option<u64>,
    /// Share of completed records with status `ok`, in `0.0..=1.0`.
    pub success_rate: Option<f64>,
}

impl HistoryStats {
    /// Computes statistics for `records`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_records(records: &[RequestRecord]) -> Self {
        let by_status = counts(RequestStatus::all(), records, |r| r.status);
        let by_method = counts(HttpMethod::all(), records, |r| r.method);

        let completed: Vec<&RequestRecord> = records
            .iter()
            .filter(|r| r.status.has_response_code())
            .collect();
        let ok = completed
            .iter()
            .filter(|r| r.status == RequestStatus::Ok)
            .count();

        let (average_duration_ms, success_rate) = if completed.is_empty() {
            (None, None)
        } else {
            let total_ms: u128 = completed.iter().map(|r| u128::from(r.duration_ms)).sum();
            // The mean of u64 values always fits back into u64.
            let average = u64::try_from(total_ms / completed.len() as u128).unwrap_or(u64::MAX);
            (
                Some(average),
                Some(ok as f64 / completed.len() as f64),
            )
        };

        Self {
            total: records.len(),
            by_status,
            by_method,
            average_duration_ms,
            success_rate,
        }
    }

    /// Returns the count for one status.
    #[must_use]
    pub fn status_count(&self, status: RequestStatus) -> usize {
        self.by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map_or(0, |(_, n)| *n)
    }

    /// Returns the count for one method.
    #[must_use]
    pub fn method_count(&self, method: HttpMethod) -> usize {
        self.by_method
            .iter()
            .find(|(m, _)| *m == method)
            .map_or(0, |(_, n)| *n)
    }
}

fn counts<K: Copy + PartialEq>(
    keys: &[K],
    records: &[RequestRecord],
    key_of: impl Fn(&RequestRecord) -> K,
) -> Vec<(K, usize)> {
    keys.iter()
        .map(|key| (*key, records.iter().filter(|r| key_of(r) == *key).count()))
        .filter(|(_, n)| *n > 0)
        .collect()
}
