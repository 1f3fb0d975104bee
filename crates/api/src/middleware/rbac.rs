//! Role extractors layered on [`AuthUser`].
//!
//! Roles rank admin > landlord > tenant; a handler asks for the lowest role
//! it accepts and every higher role passes too.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use roomly_core::error::CoreError;
use roomly_core::roles::{has_at_least, ROLE_ADMIN, ROLE_LANDLORD};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticate, then reject with 403 unless the caller ranks at least
/// `minimum`.
async fn authorize(
    parts: &mut Parts,
    state: &AppState,
    minimum: &str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if !has_at_least(user.role, minimum) {
        tracing::debug!(subject = %user.subject, role = user.role, minimum, "Role check failed");
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Role '{minimum}' or higher required"
        ))));
    }
    Ok(user)
}

/// Catalogue maintenance (countries, cities) and user administration.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, ROLE_ADMIN).await.map(RequireAdmin)
    }
}

/// Publishing and managing listings. Admins pass as well; ownership of a
/// particular apartment is checked by the handler.
pub struct RequireLandlord(pub AuthUser);

impl FromRequestParts<AppState> for RequireLandlord {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, ROLE_LANDLORD).await.map(RequireLandlord)
    }
}
