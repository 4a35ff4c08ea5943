//! Pagination over grouped history.

use serde::{Deserialize, Serialize};

use super::group::DateGroup;

/// Default number of records per history page.
pub const DEFAULT_PER_PAGE: usize = 20;

/// One page of items plus the position within the whole result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// 1-based page number actually returned.
    pub page: usize,
    /// Page size used.
    pub per_page: usize,
    /// Total number of records across all pages.
    pub total_items: usize,
    /// Number of pages, at least 1.
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Returns true if a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Returns true if an earlier page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Cuts grouped records into pages of `per_page` records.
///
/// Pages count records, not groups: a date group straddling a boundary is
/// split, and each page carries the part of it that falls on that page.
/// `page` is clamped to the valid range and a zero `per_page` counts as 1.
#[must_use]
pub fn paginate(groups: &[DateGroup], page: usize, per_page: usize) -> Page<DateGroup> {
    let per_page = per_page.max(1);
    let total_items: usize = groups.iter().map(|g| g.requests.len()).sum();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total_items);

    let mut items = Vec::new();
    let mut offset = 0;
    for group in groups {
        let group_start = offset;
        let group_end = offset + group.requests.len();
        offset = group_end;

        if group_end <= start || group_start >= end {
            continue;
        }

        let from = start.saturating_sub(group_start);
        let to = end.min(group_end) - group_start;
        items.push(DateGroup {
            date: group.date.clone(),
            requests: group.requests[from..to].to_vec(),
        });
    }

    Page {
        items,
        page,
        per_page,
        total_items,
        total_pages,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::history::RequestRecord;
    use crate::request::{HttpMethod, RequestStatus};
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn group(date: &str, count: usize) -> DateGroup {
        let requests = (0..count)
            .map(|i| {
                let mut record = RequestRecord::new(
                    HttpMethod::Get,
                    format!("/{date}/{i}"),
                    &Utc::now(),
                    RequestStatus::Ok,
                    Some(200),
                )
                .unwrap();
                record.date = date.to_string();
                record
            })
            .collect();
        DateGroup {
            date: date.to_string(),
            requests,
        }
    }

    fn shape(page: &Page<DateGroup>) -> Vec<(&str, usize)> {
        page.items
            .iter()
            .map(|g| (g.date.as_str(), g.requests.len()))
            .collect()
    }

    #[test]
    fn test_empty_history_has_single_empty_page() {
        let page = paginate(&[], 3, 10);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
        assert!(!page.has_next());
    }

    #[test]
    fn test_group_split_across_pages() {
        let groups = vec![group("2024-01-02", 3), group("2024-01-01", 2)];

        let first = paginate(&groups, 1, 2);
        assert_eq!(shape(&first), vec![("2024-01-02", 2)]);
        assert!(first.has_next());

        let second = paginate(&groups, 2, 2);
        assert_eq!(shape(&second), vec![("2024-01-02", 1), ("2024-01-01", 1)]);
        assert_eq!(second.items[0].requests[0].url, "/2024-01-02/2");

        let third = paginate(&groups, 3, 2);
        assert_eq!(shape(&third), vec![("2024-01-01", 1)]);
        assert_eq!(third.total_pages, 3);
        assert_eq!(third.total_items, 5);
        assert!(third.has_previous());
        assert!(!third.has_next());
    }

    #[test]
    fn test_page_is_clamped() {
        let groups = vec![group("2024-01-01", 3)];
        assert_eq!(paginate(&groups, 0, 2).page, 1);
        assert_eq!(paginate(&groups, 99, 2).page, 2);
    }

    #[test]
    fn test_zero_per_page_counts_as_one() {
        let groups = vec![group("2024-01-01", 3)];
        let page = paginate(&groups, 1, 0);
        assert_eq!(page.per_page, 1);
        assert_eq!(page.total_pages, 3);
    }
}
