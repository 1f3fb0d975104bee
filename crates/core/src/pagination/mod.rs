//! Offset- and cursor-based pagination shared by every list endpoint.
//!
//! The pieces, leaf to root:
//!
//! - [`request`]: raw paging parameters and their validation into a [`PageWindow`].
//! - [`filter`]: the filter/ordering AST a listing describes itself with.
//! - [`specification`]: filters + ordering + request, with the identifier
//!   tiebreaker appended so page boundaries are deterministic.
//! - [`source`]: the storage contract ([`PageSource`]) a backend implements.
//! - [`service`]: runs a specification against a source and builds the envelope.
//! - [`result`]: the `{ items, pagination }` envelope.
//! - [`memory`]: an in-memory [`PageSource`] that resolves the AST directly.

pub mod error;
pub mod filter;
pub mod memory;
pub mod request;
pub mod result;
pub mod service;
pub mod source;
pub mod specification;

pub use error::{BoxError, PaginationError};
pub use filter::{FieldValue, Filter, SortDirection, SortKey};
pub use memory::InMemoryPageSource;
pub use request::{
    CursorDirection, CursorKey, PageWindow, PaginationRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
    MIN_PAGE_SIZE,
};
pub use result::{PaginatedResult, PaginationMetadata, UNKNOWN_TOTAL_COUNT};
pub use service::PaginationService;
pub use source::{PageQuery, PageSource, Seek};
pub use specification::{Entity, PaginationSpecification};
