//! In-memory [`PageSource`]: resolves the filter AST by evaluating it
//! directly against each row.
//!
//! Mirrors Postgres semantics where they differ from naive evaluation:
//! a missing (null) value never satisfies a comparison, and nulls sort last
//! ascending and first descending.

use std::cmp::Ordering;
use std::convert::Infallible;

use async_trait::async_trait;

use super::filter::{FieldValue, Filter, SortDirection, SortKey};
use super::request::CursorDirection;
use super::source::{PageQuery, PageSource, Seek};
use super::specification::Entity;

/// A page source over an owned `Vec` of rows.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPageSource<E> {
    rows: Vec<E>,
}

impl<E> InMemoryPageSource<E> {
    pub fn new(rows: Vec<E>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[E] {
        &self.rows
    }
}

#[async_trait]
impl<E: Entity + Clone> PageSource<E> for InMemoryPageSource<E> {
    type Error = Infallible;

    async fn fetch(&self, query: &PageQuery<'_, E::Id>) -> Result<Vec<E>, Infallible> {
        let mut rows: Vec<&E> = self
            .rows
            .iter()
            .filter(|row| query.filters.iter().all(|f| matches_filter(*row, f)))
            .filter(|row| query.seek.as_ref().is_none_or(|s| passes_seek(*row, s)))
            .collect();

        rows.sort_by(|a, b| compare_rows(*a, *b, &query.ordering));

        let offset = usize::try_from(query.offset).unwrap_or(0);
        let limit = usize::try_from(query.limit).unwrap_or(0);
        Ok(rows.into_iter().skip(offset).take(limit).cloned().collect())
    }

    async fn count(&self, filters: &[Filter]) -> Result<i64, Infallible> {
        let n = self
            .rows
            .iter()
            .filter(|row| filters.iter().all(|f| matches_filter(*row, f)))
            .count();
        Ok(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

/// Evaluate one filter against one row.
pub fn matches_filter<E: Entity>(row: &E, filter: &Filter) -> bool {
    let Some(value) = row.field_value(filter.field()) else {
        return false;
    };
    let cmp = |expected: &FieldValue| value.compare(expected);
    match filter {
        Filter::Eq(_, v) => cmp(v) == Some(Ordering::Equal),
        Filter::Ne(_, v) => matches!(cmp(v), Some(Ordering::Less | Ordering::Greater)),
        Filter::Gt(_, v) => cmp(v) == Some(Ordering::Greater),
        Filter::Gte(_, v) => matches!(cmp(v), Some(Ordering::Greater | Ordering::Equal)),
        Filter::Lt(_, v) => cmp(v) == Some(Ordering::Less),
        Filter::Lte(_, v) => matches!(cmp(v), Some(Ordering::Less | Ordering::Equal)),
        Filter::Contains(_, needle) => match &value {
            FieldValue::Text(text) => text.to_lowercase().contains(&needle.to_lowercase()),
            _ => false,
        },
        Filter::In(_, values) => values.iter().any(|v| cmp(v) == Some(Ordering::Equal)),
    }
}

fn passes_seek<E: Entity>(row: &E, seek: &Seek<E::Id>) -> bool {
    let id = row.id();
    match seek.direction {
        CursorDirection::Forward => id > seek.key,
        CursorDirection::Backward => id < seek.key,
    }
}

fn compare_rows<E: Entity>(a: &E, b: &E, ordering: &[SortKey]) -> Ordering {
    for key in ordering {
        let ord = compare_values(
            a.field_value(key.field).as_ref(),
            b.field_value(key.field).as_ref(),
        );
        let ord = match key.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Ascending comparison with nulls last.
fn compare_values(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.compare(b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
