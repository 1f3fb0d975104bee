//! Storage contract consumed by the pagination service.

use async_trait::async_trait;

use super::filter::{Filter, SortKey};
use super::request::CursorDirection;
use super::specification::Entity;

/// Cursor predicate on the tiebreaker field: `field > key` when reading
/// forward, `field < key` when reading backward.
#[derive(Debug, Clone, PartialEq)]
pub struct Seek<K> {
    pub field: &'static str,
    pub key: K,
    pub direction: CursorDirection,
}

/// A fully resolved page read: filters, ordering, optional seek, and window.
#[derive(Debug, Clone)]
pub struct PageQuery<'a, K> {
    pub filters: &'a [Filter],
    pub ordering: Vec<SortKey>,
    pub seek: Option<Seek<K>>,
    pub offset: i64,
    pub limit: i64,
}

/// Anything that can list and count entities for a specification.
///
/// How the source talks to storage is its own business. The only demand is
/// that the identifier ordering is stable and injective so cursor seeks are
/// well defined.
#[async_trait]
pub trait PageSource<E: Entity>: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Rows matching the filters and seek, ordered and windowed.
    async fn fetch(&self, query: &PageQuery<'_, E::Id>) -> Result<Vec<E>, Self::Error>;

    /// Number of rows matching the filters alone.
    async fn count(&self, filters: &[Filter]) -> Result<i64, Self::Error>;
}
