//! SQL resolver for the pagination filter AST and the Postgres-backed
//! [`PageSource`].
//!
//! Field names are pasted into the SQL text as-is, so they must come from
//! the entity's `FIELDS` list. [`PaginationSpecification::check_fields`] runs
//! before any query is built. Every value goes through a bind parameter.
//!
//! [`PaginationSpecification::check_fields`]: roomly_core::pagination::PaginationSpecification::check_fields

use std::marker::PhantomData;

use async_trait::async_trait;
use roomly_core::pagination::{
    CursorDirection, Entity, FieldValue, Filter, PageQuery, PageSource, PaginatedResult,
    PaginationError, PaginationService, PaginationSpecification, Seek, SortDirection,
};
use roomly_core::types::DbId;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tokio_util::sync::CancellationToken;

/// An [`Entity`] stored in a single Postgres table.
pub trait PgEntity: Entity<Id = DbId> + for<'r> FromRow<'r, PgRow> + Unpin {
    const TABLE: &'static str;
    /// Column list for `SELECT` statements.
    const COLUMNS: &'static str;
}

/// Page source reading `E` rows from its table.
pub struct PgPageSource<E> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E: PgEntity> PgPageSource<E> {
    pub fn new(pool: &PgPool) -> Self {
        Self {
            pool: pool.clone(),
            _entity: PhantomData,
        }
    }

    /// Run `spec` through the [`PaginationService`] against this table,
    /// abandoning the query with [`PaginationError::Cancelled`] once
    /// `cancel` fires.
    pub async fn paginate(
        &self,
        spec: &PaginationSpecification<E>,
        cancel: &CancellationToken,
    ) -> Result<PaginatedResult<E>, PaginationError> {
        PaginationService::get_paginated_with_cancel(self, spec, cancel).await
    }
}

#[async_trait]
impl<E: PgEntity> PageSource<E> for PgPageSource<E> {
    type Error = sqlx::Error;

    async fn fetch(&self, query: &PageQuery<'_, DbId>) -> Result<Vec<E>, sqlx::Error> {
        let mut qb = select_query::<E>(query);
        qb.build_query_as::<E>().fetch_all(&self.pool).await
    }

    async fn count(&self, filters: &[Filter]) -> Result<i64, sqlx::Error> {
        let mut qb = count_query::<E>(filters);
        qb.build_query_scalar::<i64>().fetch_one(&self.pool).await
    }
}

/// `SELECT` for one page: filters, seek, ordering, limit and offset.
pub fn select_query<E: PgEntity>(query: &PageQuery<'_, DbId>) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM {}", E::COLUMNS, E::TABLE));
    push_where(&mut qb, query.filters, query.seek.as_ref());

    if !query.ordering.is_empty() {
        qb.push(" ORDER BY ");
        for (i, key) in query.ordering.iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(key.field);
            qb.push(match key.direction {
                SortDirection::Asc => " ASC",
                SortDirection::Desc => " DESC",
            });
        }
    }

    qb.push(" LIMIT ").push_bind(query.limit);
    if query.offset > 0 {
        qb.push(" OFFSET ").push_bind(query.offset);
    }
    qb
}

/// `SELECT COUNT(*)` over the filters alone.
pub fn count_query<E: PgEntity>(filters: &[Filter]) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", E::TABLE));
    push_where(&mut qb, filters, None);
    qb
}

fn push_where(qb: &mut QueryBuilder<'static, Postgres>, filters: &[Filter], seek: Option<&Seek<DbId>>) {
    if filters.is_empty() && seek.is_none() {
        return;
    }
    qb.push(" WHERE ");
    let mut first = true;
    for filter in filters {
        if !first {
            qb.push(" AND ");
        }
        first = false;
        push_filter(qb, filter);
    }
    if let Some(seek) = seek {
        if !first {
            qb.push(" AND ");
        }
        qb.push(seek.field);
        qb.push(match seek.direction {
            CursorDirection::Forward => " > ",
            CursorDirection::Backward => " < ",
        });
        qb.push_bind(seek.key);
    }
}

fn push_filter(qb: &mut QueryBuilder<'static, Postgres>, filter: &Filter) {
    let (field, op, value) = match filter {
        Filter::Eq(f, v) => (f, " = ", v),
        Filter::Ne(f, v) => (f, " <> ", v),
        Filter::Gt(f, v) => (f, " > ", v),
        Filter::Gte(f, v) => (f, " >= ", v),
        Filter::Lt(f, v) => (f, " < ", v),
        Filter::Lte(f, v) => (f, " <= ", v),
        Filter::Contains(f, needle) => {
            qb.push(*f);
            qb.push(" ILIKE ");
            qb.push_bind(format!("%{}%", escape_like(needle)));
            return;
        }
        Filter::In(f, values) => {
            if values.is_empty() {
                qb.push("FALSE");
                return;
            }
            qb.push(*f);
            qb.push(" IN (");
            for (i, v) in values.iter().enumerate() {
                if i > 0 {
                    qb.push(", ");
                }
                push_value(qb, v);
            }
            qb.push(")");
            return;
        }
    };
    qb.push(*field);
    qb.push(op);
    push_value(qb, value);
}

fn push_value(qb: &mut QueryBuilder<'static, Postgres>, value: &FieldValue) {
    match value {
        FieldValue::Int(v) => qb.push_bind(*v),
        FieldValue::Float(v) => qb.push_bind(*v),
        FieldValue::Text(v) => qb.push_bind(v.clone()),
        FieldValue::Bool(v) => qb.push_bind(*v),
    };
}

/// Escape `LIKE` wildcards so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
