//! Failure taxonomy for the pagination core.

/// Boxed lower-layer fault carried by [`PaginationError::Unexpected`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Every way a paginated read can fail.
///
/// The first four variants are caller mistakes detected before any query is
/// issued. [`PaginationError::Unexpected`] wraps whatever the storage layer
/// returned; it is surfaced as-is and never retried here.
#[derive(Debug, thiserror::Error)]
pub enum PaginationError {
    #[error("Page size must be between {min} and {max}, got {got}")]
    InvalidPageSize { got: i64, min: i64, max: i64 },

    #[error("Page number must be at least 1, got {0}")]
    InvalidPageNumber(i64),

    #[error("Cursor '{0}' is not a valid identifier")]
    InvalidCursor(String),

    #[error("Unknown field '{field}' for {entity}")]
    UnknownField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("Pagination was cancelled")]
    Cancelled,

    #[error("Unexpected error: {0}")]
    Unexpected(#[source] BoxError),
}

impl PaginationError {
    /// Wrap a storage fault.
    pub fn unexpected(err: impl Into<BoxError>) -> Self {
        Self::Unexpected(err.into())
    }

    /// Machine-readable error code, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidPageSize { .. } => "INVALID_PAGE_SIZE",
            Self::InvalidPageNumber(_) => "INVALID_PAGE_NUMBER",
            Self::InvalidCursor(_) => "INVALID_CURSOR",
            Self::UnknownField { .. } => "UNKNOWN_FIELD",
            Self::Cancelled => "CANCELLED",
            Self::Unexpected(_) => "UNEXPECTED_ERROR",
        }
    }

    /// Whether the caller can fix this by correcting the request.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidPageSize { .. }
                | Self::InvalidPageNumber(_)
                | Self::InvalidCursor(_)
                | Self::UnknownField { .. }
        )
    }
}
