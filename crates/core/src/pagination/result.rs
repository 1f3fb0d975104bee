//! The `{ items, pagination }` envelope returned by every list endpoint.

use serde::Serialize;

/// `total_count` value used when the total was not computed (cursor mode).
pub const UNKNOWN_TOTAL_COUNT: i64 = -1;

/// Facts about one page, enough for the caller to ask for the next one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    pub page_number: i64,
    pub page_size: i64,
    /// [`UNKNOWN_TOTAL_COUNT`] in cursor mode.
    pub total_count: i64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub current_page_size: usize,
    pub first_cursor: Option<String>,
    pub last_cursor: Option<String>,
}

impl PaginationMetadata {
    /// `ceil(total_count / page_size)`, or `None` when the total is unknown.
    pub fn total_pages(&self) -> Option<i64> {
        if self.total_count < 0 || self.page_size <= 0 {
            return None;
        }
        Some(total_pages(self.total_count, self.page_size))
    }
}

pub(crate) fn total_pages(total_count: i64, page_size: i64) -> i64 {
    if total_count == 0 {
        0
    } else {
        (total_count + page_size - 1) / page_size
    }
}

/// One page of items plus its metadata.
///
/// `items.len()` always equals `metadata.current_page_size`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    #[serde(rename = "pagination")]
    pub metadata: PaginationMetadata,
}

impl<T> PaginatedResult<T> {
    /// Convert every item, keeping the metadata as-is.
    ///
    /// ```
    /// use roomly_core::pagination::{PaginatedResult, PaginationMetadata};
    ///
    /// let page = PaginatedResult {
    ///     items: vec![1, 2],
    ///     metadata: PaginationMetadata {
    ///         page_number: 1,
    ///         page_size: 10,
    ///         total_count: 2,
    ///         has_next_page: false,
    ///         has_previous_page: false,
    ///         current_page_size: 2,
    ///         first_cursor: Some("1".into()),
    ///         last_cursor: Some("2".into()),
    ///     },
    /// };
    /// let labels = page.map(|n| format!("#{n}"));
    /// assert_eq!(labels.items, vec!["#1", "#2"]);
    /// assert_eq!(labels.metadata.total_count, 2);
    /// ```
    pub fn map<U, F>(self, transform: F) -> PaginatedResult<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResult {
            items: self.items.into_iter().map(transform).collect(),
            metadata: self.metadata,
        }
    }
}
