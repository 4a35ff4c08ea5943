//! Query history use case

use restpad_domain::history::DEFAULT_PER_PAGE;
use restpad_domain::{
    DateGroup, FilterCriteria, HistoryStats, Page, filter_requests, group_requests_by_date,
    paginate,
};
use tracing::debug;

use crate::error::ApplicationResult;
use crate::ports::HistorySource;

/// Input for [`QueryHistory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryHistoryInput {
    /// Constraints on the records to show.
    pub criteria: FilterCriteria,
    /// 1-based page number.
    pub page: usize,
    /// Records per page.
    pub per_page: usize,
}

impl Default for QueryHistoryInput {
    fn default() -> Self {
        Self {
            criteria: FilterCriteria::default(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Display-ready history.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryHistoryOutput {
    /// The requested page of date groups.
    pub page: Page<DateGroup>,
    /// Statistics over all filtered records, not just this page.
    pub stats: HistoryStats,
}

/// Loads history and runs it through filter, group and pagination.
pub struct QueryHistory<H> {
    history: H,
}

impl<H: HistorySource> QueryHistory<H> {
    /// Creates a new `QueryHistory` use case.
    pub const fn new(history: H) -> Self {
        Self { history }
    }

    /// Executes the use case.
    ///
    /// # Errors
    ///
    /// Returns a classified error if the history cannot be loaded.
    pub async fn execute(
        &self,
        input: &QueryHistoryInput,
    ) -> ApplicationResult<QueryHistoryOutput> {
        let records = self.history.load().await?;
        let filtered = filter_requests(&records, &input.criteria);
        debug!(
            loaded = records.len(),
            matched = filtered.len(),
            "filtered request history"
        );

        let groups = group_requests_by_date(&filtered);
        Ok(QueryHistoryOutput {
            page: paginate(&groups, input.page, input.per_page),
            stats: HistoryStats::from_records(&filtered),
        })
    }
}
