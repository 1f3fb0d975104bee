//! Shared response envelope types for API handlers.
//!
//! Single entities use a `{ "data": ... }` envelope. List endpoints return
//! [`PaginatedResult`](roomly_core::pagination::PaginatedResult) directly,
//! which serializes as `{ "items": [...], "pagination": {...} }`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: country }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
