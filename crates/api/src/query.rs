//! Shared query parameter types for API handlers.

use roomly_core::pagination::{CursorDirection, PaginationRequest};
use serde::Deserialize;

/// Paging parameters accepted by every list endpoint
/// (`?pageNumber=&pageSize=&cursor=&direction=`).
///
/// Nothing is checked here; out-of-range values surface as pagination
/// validation errors (400) from the service.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
    pub cursor: Option<String>,
    pub direction: Option<CursorDirection>,
}

impl PaginationParams {
    /// Fill in defaults: page 1, `default_page_size`, forward.
    pub fn into_request(self, default_page_size: i64) -> PaginationRequest {
        PaginationRequest::new(
            self.page_number.unwrap_or(1),
            self.page_size.unwrap_or(default_page_size),
            self.cursor,
            self.direction.unwrap_or_default(),
        )
    }
}
