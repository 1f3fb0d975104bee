//! Query shape of one listing: filters, ordering, and paging.

use std::marker::PhantomData;

use super::error::PaginationError;
use super::filter::{FieldValue, Filter, SortDirection, SortKey};
use super::request::{CursorDirection, CursorKey, PageWindow, PaginationRequest};
use super::source::{PageQuery, Seek};

/// A row type that can be paginated.
///
/// `ID_FIELD` is the unique key appended to every ordering as the tiebreaker
/// and used as the cursor. `FIELDS` lists every field name filters and
/// orderings may reference.
pub trait Entity: Send + Sync + 'static {
    type Id: CursorKey;

    /// Human-readable entity name used in error messages.
    const NAME: &'static str;

    const ID_FIELD: &'static str = "id";

    const FIELDS: &'static [&'static str];

    fn id(&self) -> Self::Id;

    /// Current value of a field, `None` when the field is null or unknown.
    fn field_value(&self, field: &str) -> Option<FieldValue>;
}

/// Filters + domain ordering + the request they page over.
///
/// Listings build one through the chained methods. The identifier
/// tiebreaker and the skip/take/seek mechanics are added by
/// [`PaginationSpecification::query`] and cannot be replaced.
#[derive(Debug, Clone)]
pub struct PaginationSpecification<E: Entity> {
    request: PaginationRequest,
    filters: Vec<Filter>,
    ordering: Vec<SortKey>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> PaginationSpecification<E> {
    pub fn new(request: PaginationRequest) -> Self {
        Self {
            request,
            filters: Vec::new(),
            ordering: Vec::new(),
            _entity: PhantomData,
        }
    }

    /// Add a filter; all filters are ANDed.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Add a filter only when the optional parameter is present.
    pub fn filter_if<T>(self, value: Option<T>, build: impl FnOnce(T) -> Filter) -> Self {
        match value {
            Some(v) => self.filter(build(v)),
            None => self,
        }
    }

    /// Append a domain ordering key. Keys apply in the order they are added.
    pub fn order_by(mut self, field: &'static str, direction: SortDirection) -> Self {
        self.ordering.push(SortKey { field, direction });
        self
    }

    pub fn request(&self) -> &PaginationRequest {
        &self.request
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Domain ordering followed by the identifier tiebreaker.
    ///
    /// The tiebreaker is skipped when a domain key already orders by the
    /// identifier, since the ordering is total at that point.
    pub fn ordering(&self) -> Vec<SortKey> {
        let mut keys = self.ordering.clone();
        if !keys.iter().any(|k| k.field == E::ID_FIELD) {
            keys.push(SortKey::asc(E::ID_FIELD));
        }
        keys
    }

    /// Reject filters or orderings naming a field the entity does not have.
    pub fn check_fields(&self) -> Result<(), PaginationError> {
        let referenced = self
            .filters
            .iter()
            .map(Filter::field)
            .chain(self.ordering.iter().map(|k| k.field));
        for field in referenced {
            if field != E::ID_FIELD && !E::FIELDS.contains(&field) {
                return Err(PaginationError::UnknownField {
                    entity: E::NAME,
                    field,
                });
            }
        }
        Ok(())
    }

    /// Build the storage query for a validated window.
    ///
    /// Offset windows use the full ordering with skip/take. Cursor windows
    /// seek on the identifier, order by it alone (descending when reading
    /// backward), and take one extra row so the caller can tell whether
    /// another page exists.
    pub fn query<'a>(&'a self, window: &PageWindow<E::Id>) -> PageQuery<'a, E::Id> {
        match window {
            PageWindow::Offset {
                page_number,
                page_size,
            } => PageQuery {
                filters: &self.filters,
                ordering: self.ordering(),
                seek: None,
                offset: (page_number - 1).saturating_mul(*page_size),
                limit: *page_size,
            },
            PageWindow::Cursor {
                page_size,
                key,
                direction,
                ..
            } => {
                let order = match direction {
                    CursorDirection::Forward => SortKey::asc(E::ID_FIELD),
                    CursorDirection::Backward => SortKey::desc(E::ID_FIELD),
                };
                PageQuery {
                    filters: &self.filters,
                    ordering: vec![order],
                    seek: Some(Seek {
                        field: E::ID_FIELD,
                        key: key.clone(),
                        direction: *direction,
                    }),
                    offset: 0,
                    limit: page_size + 1,
                }
            }
        }
    }
}
