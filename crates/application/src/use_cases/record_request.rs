//! Record request use case

use restpad_domain::{HttpMethod, RecordHeader, RequestRecord, RequestStatus, VariableBindings};
use tracing::{debug, info};

use crate::error::ApplicationResult;
use crate::ports::{Clock, HistorySource};
use crate::variable_resolver::{Resolution, resolve_variables};

/// Input for [`RecordRequest`]. Text fields are templates that may contain
/// `{{variable}}` references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRequestInput {
    /// HTTP method.
    pub method: HttpMethod,
    /// URL template.
    pub url: String,
    /// Headers; values are templates.
    pub headers: Vec<RecordHeader>,
    /// Body template.
    pub body: String,
    /// Outcome classification.
    pub status: RequestStatus,
    /// Response code for completed requests.
    pub response_code: Option<u16>,
    /// Round-trip duration in milliseconds.
    pub duration_ms: u64,
    /// Raw response body.
    pub response_body: String,
}

impl RecordRequestInput {
    /// Creates an input for a request that is still in process.
    #[must_use]
    pub fn issued(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: String::new(),
            status: RequestStatus::InProcess,
            response_code: None,
            duration_ms: 0,
            response_body: String::new(),
        }
    }

    /// Marks the request as completed with `code`, classifying its status.
    #[must_use]
    pub const fn completed(mut self, code: u16, duration_ms: u64) -> Self {
        self.status = RequestStatus::from_response_code(code);
        self.response_code = Some(code);
        self.duration_ms = duration_ms;
        self
    }
}

/// Resolves a request against environment bindings and appends it to history.
pub struct RecordRequest<H, C> {
    history: H,
    clock: C,
}

impl<H: HistorySource, C: Clock> RecordRequest<H, C> {
    /// Creates a new `RecordRequest` use case.
    pub const fn new(history: H, clock: C) -> Self {
        Self { history, clock }
    }

    /// Executes the use case and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the status and response code disagree,
    /// or a classified error if the history cannot be written.
    pub async fn execute(
        &self,
        input: RecordRequestInput,
        bindings: &VariableBindings,
    ) -> ApplicationResult<RequestRecord> {
        let mut substituted = VariableBindings::new();
        let mut resolve = |template: &str| {
            let Resolution {
                resolved,
                substituted: used,
                unresolved,
            } = resolve_variables(template, bindings);
            if !unresolved.is_empty() {
                debug!(?unresolved, "unresolved variables left in request");
            }
            substituted.extend(used);
            resolved
        };

        let url = resolve(&input.url);
        let headers = input
            .headers
            .iter()
            .map(|header| RecordHeader::new(header.key.clone(), resolve(&header.value)))
            .collect();
        let body = resolve(&input.body);

        let record = RequestRecord::new(
            input.method,
            url,
            &self.clock.now(),
            input.status,
            input.response_code,
        )?
        .with_headers(headers)
        .with_request_body(body)
        .with_response_body(input.response_body)
        .with_duration_ms(input.duration_ms)
        .with_variables(substituted);

        self.history.append(record.clone()).await?;
        info!(
            id = %record.id,
            method = %record.method,
            status = %record.status,
            "recorded request"
        );

        Ok(record)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ApplicationError;
    use crate::use_cases::test_support::MockHistory;
    use chrono::{DateTime, Local, TimeZone};
    use pretty_assertions::assert_eq;

    struct FixedClock(DateTime<Local>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Local> {
            self.0
        }
    }

    fn clock() -> FixedClock {
        FixedClock(Local.with_ymd_and_hms(2024, 5, 17, 14, 3, 9).single().unwrap())
    }

    fn bindings(pairs: &[(&str, &str)]) -> VariableBindings {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_records_resolved_request() {
        let history = MockHistory::default();
        let use_case = RecordRequest::new(history, clock());
        let vars = bindings(&[("host", "api.test"), ("token", "t0k"), ("unused", "x")]);

        let mut input = RecordRequestInput::issued(HttpMethod::Post, "https://{{host}}/users")
            .completed(201, 87);
        input.headers = vec![RecordHeader::new("Authorization", "Bearer {{token}}")];
        input.body = r#"{"name":"{{name}}"}"#.to_string();
        input.response_body = "created".to_string();

        let record = use_case.execute(input, &vars).await.unwrap();

        assert_eq!(record.url, "https://api.test/users");
        assert_eq!(record.headers[0].value, "Bearer t0k");
        assert_eq!(record.request_body, r#"{"name":"{{name}}"}"#);
        assert_eq!(record.variables, bindings(&[("host", "api.test"), ("token", "t0k")]));
        assert_eq!(record.date, "2024-05-17");
        assert_eq!(record.time, "14:03:09");
        assert_eq!(record.status, RequestStatus::Ok);
        assert_eq!(record.response_code, Some(201));
        assert_eq!(record.response_size, "7 B");

        let stored = use_case.history.records.lock().unwrap().clone();
        assert_eq!(stored, vec![record]);
    }

    #[tokio::test]
    async fn test_issued_request_has_no_code() {
        let use_case = RecordRequest::new(MockHistory::default(), clock());
        let record = use_case
            .execute(
                RecordRequestInput::issued(HttpMethod::Get, "/ping"),
                &VariableBindings::new(),
            )
            .await
            .unwrap();

        assert_eq!(record.status, RequestStatus::InProcess);
        assert_eq!(record.response_code, None);
    }

    #[tokio::test]
    async fn test_inconsistent_status_is_validation_error() {
        let use_case = RecordRequest::new(MockHistory::default(), clock());
        let mut input = RecordRequestInput::issued(HttpMethod::Get, "/ping");
        input.status = RequestStatus::Ok;

        let error = use_case
            .execute(input, &VariableBindings::new())
            .await
            .unwrap_err();

        assert!(matches!(error, ApplicationError::Validation { .. }));
        assert!(use_case.history.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_failure_propagates() {
        let use_case = RecordRequest::new(MockHistory::unavailable(), clock());
        let error = use_case
            .execute(
                RecordRequestInput::issued(HttpMethod::Get, "/ping"),
                &VariableBindings::new(),
            )
            .await
            .unwrap_err();

        assert_eq!(error.code(), Some("history/unavailable"));
    }
}
