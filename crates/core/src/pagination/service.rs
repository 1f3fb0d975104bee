//! Runs a specification against a page source and assembles the envelope.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use super::error::{BoxError, PaginationError};
use super::request::{CursorDirection, PageWindow};
use super::result::{total_pages, PaginatedResult, PaginationMetadata, UNKNOWN_TOTAL_COUNT};
use super::source::PageSource;
use super::specification::{Entity, PaginationSpecification};

/// Stateless pagination executor.
///
/// Each call validates, picks offset or cursor mode, queries the source,
/// and returns a complete page or a single error. Nothing is shared
/// between calls.
pub struct PaginationService;

impl PaginationService {
    /// Fetch one page described by `spec` from `source`.
    pub async fn get_paginated<E, S>(
        source: &S,
        spec: &PaginationSpecification<E>,
    ) -> Result<PaginatedResult<E>, PaginationError>
    where
        E: Entity,
        S: PageSource<E> + ?Sized,
    {
        Self::execute(source, spec, None).await
    }

    /// Like [`PaginationService::get_paginated`], but gives up with
    /// [`PaginationError::Cancelled`] as soon as `cancel` fires. An
    /// in-flight storage call is dropped and nothing partial is returned.
    pub async fn get_paginated_with_cancel<E, S>(
        source: &S,
        spec: &PaginationSpecification<E>,
        cancel: &CancellationToken,
    ) -> Result<PaginatedResult<E>, PaginationError>
    where
        E: Entity,
        S: PageSource<E> + ?Sized,
    {
        Self::execute(source, spec, Some(cancel)).await
    }

    async fn execute<E, S>(
        source: &S,
        spec: &PaginationSpecification<E>,
        cancel: Option<&CancellationToken>,
    ) -> Result<PaginatedResult<E>, PaginationError>
    where
        E: Entity,
        S: PageSource<E> + ?Sized,
    {
        let window = spec.request().validate::<E::Id>()?;
        spec.check_fields()?;

        match &window {
            PageWindow::Offset {
                page_number,
                page_size,
            } => {
                let total_count = guarded(source.count(spec.filters()), cancel).await?;
                let query = spec.query(&window);
                let items = guarded(source.fetch(&query), cancel).await?;

                let total_pages = total_pages(total_count, *page_size);
                tracing::debug!(
                    entity = E::NAME,
                    page_number,
                    page_size,
                    total_count,
                    returned = items.len(),
                    "Offset page fetched"
                );

                let metadata = build_metadata(
                    &items,
                    *page_number,
                    *page_size,
                    total_count,
                    *page_number < total_pages,
                    *page_number > 1,
                );
                Ok(PaginatedResult { items, metadata })
            }
            PageWindow::Cursor {
                page_number,
                page_size,
                direction,
                ..
            } => {
                let query = spec.query(&window);
                let mut items = guarded(source.fetch(&query), cancel).await?;

                let limit = usize::try_from(*page_size).unwrap_or(usize::MAX);
                let has_next_page = items.len() > limit;
                items.truncate(limit);
                // Backward pages are read newest-first; present them in
                // ascending identifier order like every other page.
                if *direction == CursorDirection::Backward {
                    items.reverse();
                }

                tracing::debug!(
                    entity = E::NAME,
                    page_size,
                    ?direction,
                    returned = items.len(),
                    has_next_page,
                    "Cursor page fetched"
                );

                let metadata = build_metadata(
                    &items,
                    *page_number,
                    *page_size,
                    UNKNOWN_TOTAL_COUNT,
                    has_next_page,
                    true,
                );
                Ok(PaginatedResult { items, metadata })
            }
        }
    }
}

/// Await a storage call, racing it against the cancellation token if any.
async fn guarded<T, Err, F>(
    fut: F,
    cancel: Option<&CancellationToken>,
) -> Result<T, PaginationError>
where
    F: Future<Output = Result<T, Err>>,
    Err: Into<BoxError>,
{
    let result = match cancel {
        Some(token) => {
            tokio::select! {
                biased;
                () = token.cancelled() => return Err(PaginationError::Cancelled),
                r = fut => r,
            }
        }
        None => fut.await,
    };
    result.map_err(PaginationError::unexpected)
}

fn build_metadata<E: Entity>(
    items: &[E],
    page_number: i64,
    page_size: i64,
    total_count: i64,
    has_next_page: bool,
    has_previous_page: bool,
) -> PaginationMetadata {
    PaginationMetadata {
        page_number,
        page_size,
        total_count,
        has_next_page,
        has_previous_page,
        current_page_size: items.len(),
        first_cursor: items.first().map(|e| e.id().to_string()),
        last_cursor: items.last().map(|e| e.id().to_string()),
    }
}
