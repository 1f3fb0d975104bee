//! Repository for the `cities` table.

use roomly_core::pagination::{PaginatedResult, PaginationError, PaginationSpecification};
use roomly_core::types::DbId;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use crate::models::city::{City, CreateCity, UpdateCity};
use crate::page_source::{PgEntity, PgPageSource};

/// Provides CRUD operations for cities.
pub struct CityRepo;

impl CityRepo {
    pub async fn create(pool: &PgPool, input: &CreateCity) -> Result<City, sqlx::Error> {
        let query = format!(
            "INSERT INTO cities (country_id, name, latitude, longitude) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            City::COLUMNS
        );
        sqlx::query_as::<_, City>(&query)
            .bind(input.country_id)
            .bind(&input.name)
            .bind(input.latitude)
            .bind(input.longitude)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<City>, sqlx::Error> {
        let query = format!("SELECT {} FROM cities WHERE id = $1", City::COLUMNS);
        sqlx::query_as::<_, City>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a city. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCity,
    ) -> Result<Option<City>, sqlx::Error> {
        let query = format!(
            "UPDATE cities SET \
                 country_id = COALESCE($2, country_id), \
                 name = COALESCE($3, name), \
                 latitude = COALESCE($4, latitude), \
                 longitude = COALESCE($5, longitude) \
             WHERE id = $1 \
             RETURNING {}",
            City::COLUMNS
        );
        sqlx::query_as::<_, City>(&query)
            .bind(id)
            .bind(input.country_id)
            .bind(input.name.as_deref())
            .bind(input.latitude)
            .bind(input.longitude)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_page(
        pool: &PgPool,
        spec: &PaginationSpecification<City>,
        cancel: &CancellationToken,
    ) -> Result<PaginatedResult<City>, PaginationError> {
        PgPageSource::new(pool).paginate(spec, cancel).await
    }
}
