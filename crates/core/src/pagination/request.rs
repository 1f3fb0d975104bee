//! Inbound paging parameters and their validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::PaginationError;

/// Smallest accepted page size.
pub const MIN_PAGE_SIZE: i64 = 1;

/// Largest accepted page size.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Page size used when the caller does not send one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Which side of the cursor a cursor-based page is read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorDirection {
    /// Rows whose identifier is greater than the cursor.
    #[default]
    Forward,
    /// Rows whose identifier is less than the cursor.
    Backward,
}

/// An identifier type usable as a cursor: printable, parseable, and ordered.
pub trait CursorKey: FromStr + fmt::Display + Clone + PartialOrd + Send + Sync + 'static {}

impl<T> CursorKey for T where T: FromStr + fmt::Display + Clone + PartialOrd + Send + Sync + 'static
{}

/// Raw paging parameters of one list request.
///
/// Built once per request and never mutated. Nothing is checked at
/// construction; [`PaginationRequest::validate`] turns it into a
/// [`PageWindow`] or a typed failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationRequest {
    page_number: i64,
    page_size: i64,
    cursor: Option<String>,
    direction: CursorDirection,
}

impl Default for PaginationRequest {
    fn default() -> Self {
        Self::offset(1, DEFAULT_PAGE_SIZE)
    }
}

impl PaginationRequest {
    pub fn new(
        page_number: i64,
        page_size: i64,
        cursor: Option<String>,
        direction: CursorDirection,
    ) -> Self {
        Self {
            page_number,
            page_size,
            cursor,
            direction,
        }
    }

    /// An offset-based request for `page_number` (1-based).
    pub fn offset(page_number: i64, page_size: i64) -> Self {
        Self::new(page_number, page_size, None, CursorDirection::Forward)
    }

    /// A cursor-based request reading `page_size` rows past `cursor`.
    pub fn after_cursor(
        cursor: impl Into<String>,
        page_size: i64,
        direction: CursorDirection,
    ) -> Self {
        Self::new(1, page_size, Some(cursor.into()), direction)
    }

    pub fn page_number(&self) -> i64 {
        self.page_number
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    pub fn direction(&self) -> CursorDirection {
        self.direction
    }

    /// True iff a non-empty cursor is present.
    pub fn is_cursor_based(&self) -> bool {
        self.cursor.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Validate the request against the identifier type `K`.
    ///
    /// Checks run in order: page size, page number, cursor.
    pub fn validate<K: CursorKey>(&self) -> Result<PageWindow<K>, PaginationError> {
        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(PaginationError::InvalidPageSize {
                got: self.page_size,
                min: MIN_PAGE_SIZE,
                max: MAX_PAGE_SIZE,
            });
        }
        if self.page_number < 1 {
            return Err(PaginationError::InvalidPageNumber(self.page_number));
        }

        match self.cursor.as_deref() {
            Some(raw) if !raw.is_empty() => {
                let key = raw
                    .parse::<K>()
                    .map_err(|_| PaginationError::InvalidCursor(raw.to_string()))?;
                Ok(PageWindow::Cursor {
                    page_number: self.page_number,
                    page_size: self.page_size,
                    key,
                    direction: self.direction,
                })
            }
            _ => Ok(PageWindow::Offset {
                page_number: self.page_number,
                page_size: self.page_size,
            }),
        }
    }
}

/// A validated request: page size in range, page number positive, and the
/// cursor (if any) parsed into the identifier type.
#[derive(Debug, Clone, PartialEq)]
pub enum PageWindow<K> {
    Offset {
        page_number: i64,
        page_size: i64,
    },
    Cursor {
        page_number: i64,
        page_size: i64,
        key: K,
        direction: CursorDirection,
    },
}

impl<K> PageWindow<K> {
    pub fn page_number(&self) -> i64 {
        match self {
            Self::Offset { page_number, .. } | Self::Cursor { page_number, .. } => *page_number,
        }
    }

    pub fn page_size(&self) -> i64 {
        match self {
            Self::Offset { page_size, .. } | Self::Cursor { page_size, .. } => *page_size,
        }
    }

    pub fn is_cursor_based(&self) -> bool {
        matches!(self, Self::Cursor { .. })
    }
}
