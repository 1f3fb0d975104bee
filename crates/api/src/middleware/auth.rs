//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use roomly_core::error::CoreError;
use roomly_core::roles::{highest_role, ROLE_ADMIN};
use roomly_db::models::user::{IdentitySync, User};
use roomly_db::repositories::UserRepo;
use roomly_db::DbPool;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(subject = %user.subject, role = user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The identity provider's subject id (`claims.sub`).
    pub subject: String,
    pub email: String,
    pub name: String,
    /// Highest known realm role: `"admin"`, `"landlord"` or `"tenant"`.
    pub role: &'static str,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Upsert the local `users` row for this caller and return it.
    pub async fn sync(&self, pool: &DbPool) -> Result<User, sqlx::Error> {
        let identity = IdentitySync {
            external_id: self.subject.clone(),
            email: self.email.clone(),
            display_name: self.name.clone(),
            role: self.role.to_string(),
        };
        UserRepo::sync_from_identity(pool, &identity).await
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let email = claims.email.filter(|e| !e.is_empty()).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Token is missing the email claim".into(),
            ))
        })?;
        let name = claims
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| email.clone());

        Ok(AuthUser {
            role: highest_role(&claims.realm_access.roles),
            subject: claims.sub,
            email,
            name,
        })
    }
}
