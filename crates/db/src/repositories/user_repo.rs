//! Repository for the `users` table.

use roomly_core::pagination::{PaginatedResult, PaginationError, PaginationSpecification};
use roomly_core::types::DbId;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use crate::models::user::{IdentitySync, UpdateUser, User};
use crate::page_source::{PgEntity, PgPageSource};

/// Provides CRUD operations for users mirrored from the identity provider.
pub struct UserRepo;

impl UserRepo {
    /// Insert the user on first sight, otherwise refresh email and display
    /// name from the token. The stored role is only set on insert; after
    /// that it is managed through [`UserRepo::update`].
    pub async fn sync_from_identity(
        pool: &PgPool,
        identity: &IdentitySync,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (external_id, email, display_name, role) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (external_id) DO UPDATE SET \
                 email = EXCLUDED.email, \
                 display_name = EXCLUDED.display_name \
             RETURNING {}",
            User::COLUMNS
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&identity.external_id)
            .bind(&identity.email)
            .bind(&identity.display_name)
            .bind(&identity.role)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {} FROM users WHERE id = $1", User::COLUMNS);
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_external_id(
        pool: &PgPool,
        external_id: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {} FROM users WHERE external_id = $1", User::COLUMNS);
        sqlx::query_as::<_, User>(&query)
            .bind(external_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a user's display name and/or role. Returns `None` if no row
    /// with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET \
                 display_name = COALESCE($2, display_name), \
                 role = COALESCE($3, role) \
             WHERE id = $1 \
             RETURNING {}",
            User::COLUMNS
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(input.display_name.as_deref())
            .bind(input.role.as_deref())
            .fetch_optional(pool)
            .await
    }

    /// Delete a user. Their apartments are removed by cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_page(
        pool: &PgPool,
        spec: &PaginationSpecification<User>,
        cancel: &CancellationToken,
    ) -> Result<PaginatedResult<User>, PaginationError> {
        PgPageSource::new(pool).paginate(spec, cancel).await
    }
}
