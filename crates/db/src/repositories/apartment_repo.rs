//! Repository for the `apartments` table.

use roomly_core::pagination::{PaginatedResult, PaginationError, PaginationSpecification};
use roomly_core::types::DbId;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use crate::models::apartment::{Apartment, CreateApartment, UpdateApartment};
use crate::page_source::{PgEntity, PgPageSource};

/// Provides CRUD operations for apartment listings.
pub struct ApartmentRepo;

impl ApartmentRepo {
    /// Insert a listing owned by `landlord_id`. Listings start available
    /// unless the input says otherwise.
    pub async fn create(
        pool: &PgPool,
        landlord_id: DbId,
        input: &CreateApartment,
    ) -> Result<Apartment, sqlx::Error> {
        let query = format!(
            "INSERT INTO apartments \
                 (landlord_id, city_id, title, description, address, price_per_night, \
                  bedrooms, bathrooms, area_sqm, latitude, longitude, is_available) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {}",
            Apartment::COLUMNS
        );
        sqlx::query_as::<_, Apartment>(&query)
            .bind(landlord_id)
            .bind(input.city_id)
            .bind(&input.title)
            .bind(input.description.as_deref())
            .bind(&input.address)
            .bind(input.price_per_night)
            .bind(input.bedrooms)
            .bind(input.bathrooms)
            .bind(input.area_sqm)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.is_available.unwrap_or(true))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Apartment>, sqlx::Error> {
        let query = format!("SELECT {} FROM apartments WHERE id = $1", Apartment::COLUMNS);
        sqlx::query_as::<_, Apartment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a listing. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateApartment,
    ) -> Result<Option<Apartment>, sqlx::Error> {
        let query = format!(
            "UPDATE apartments SET \
                 city_id = COALESCE($2, city_id), \
                 title = COALESCE($3, title), \
                 description = COALESCE($4, description), \
                 address = COALESCE($5, address), \
                 price_per_night = COALESCE($6, price_per_night), \
                 bedrooms = COALESCE($7, bedrooms), \
                 bathrooms = COALESCE($8, bathrooms), \
                 area_sqm = COALESCE($9, area_sqm), \
                 latitude = COALESCE($10, latitude), \
                 longitude = COALESCE($11, longitude), \
                 is_available = COALESCE($12, is_available) \
             WHERE id = $1 \
             RETURNING {}",
            Apartment::COLUMNS
        );
        sqlx::query_as::<_, Apartment>(&query)
            .bind(id)
            .bind(input.city_id)
            .bind(input.title.as_deref())
            .bind(input.description.as_deref())
            .bind(input.address.as_deref())
            .bind(input.price_per_night)
            .bind(input.bedrooms)
            .bind(input.bathrooms)
            .bind(input.area_sqm)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.is_available)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM apartments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_page(
        pool: &PgPool,
        spec: &PaginationSpecification<Apartment>,
        cancel: &CancellationToken,
    ) -> Result<PaginatedResult<Apartment>, PaginationError> {
        PgPageSource::new(pool).paginate(spec, cancel).await
    }
}
