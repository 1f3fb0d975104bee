//! Repository for the `countries` table.

use roomly_core::pagination::{PaginatedResult, PaginationError, PaginationSpecification};
use roomly_core::types::DbId;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use crate::models::country::{Country, CreateCountry, UpdateCountry};
use crate::page_source::{PgEntity, PgPageSource};

/// Provides CRUD operations for countries.
pub struct CountryRepo;

impl CountryRepo {
    /// Insert a new country. The ISO code is stored upper case.
    pub async fn create(pool: &PgPool, input: &CreateCountry) -> Result<Country, sqlx::Error> {
        let query = format!(
            "INSERT INTO countries (name, iso_code) VALUES ($1, $2) RETURNING {}",
            Country::COLUMNS
        );
        sqlx::query_as::<_, Country>(&query)
            .bind(&input.name)
            .bind(input.iso_code.to_uppercase())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Country>, sqlx::Error> {
        let query = format!("SELECT {} FROM countries WHERE id = $1", Country::COLUMNS);
        sqlx::query_as::<_, Country>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a country. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCountry,
    ) -> Result<Option<Country>, sqlx::Error> {
        let query = format!(
            "UPDATE countries SET \
                 name = COALESCE($2, name), \
                 iso_code = COALESCE($3, iso_code) \
             WHERE id = $1 \
             RETURNING {}",
            Country::COLUMNS
        );
        sqlx::query_as::<_, Country>(&query)
            .bind(id)
            .bind(input.name.as_deref())
            .bind(input.iso_code.as_deref().map(str::to_uppercase))
            .fetch_optional(pool)
            .await
    }

    /// Delete a country. Fails with a foreign key violation while cities
    /// still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM countries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_page(
        pool: &PgPool,
        spec: &PaginationSpecification<Country>,
        cancel: &CancellationToken,
    ) -> Result<PaginatedResult<Country>, PaginationError> {
        PgPageSource::new(pool).paginate(spec, cancel).await
    }
}
