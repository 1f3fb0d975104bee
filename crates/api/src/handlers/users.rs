//! Admin handlers for the `/users` resource.
//!
//! Users are created implicitly on first authenticated request; there is
//! no create endpoint.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use roomly_core::error::CoreError;
use roomly_core::roles::{is_valid_role, VALID_ROLES};
use roomly_core::types::DbId;
use roomly_db::models::user::{UpdateUser, UserListParams};
use roomly_db::repositories::UserRepo;
use roomly_db::specifications;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/users
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(paging): Query<PaginationParams>,
    Query(params): Query<UserListParams>,
) -> AppResult<impl IntoResponse> {
    let spec = specifications::user_list(&params, paging.into_request(state.config.default_page_size));
    let page = UserRepo::list_page(&state.pool, &spec, &state.shutdown).await?;
    Ok(Json(page))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(DataResponse { data: user }))
}

/// PUT /api/v1/users/{id}
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(role) = input.role.as_deref() {
        if !is_valid_role(role) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown role '{role}', expected one of: {}",
                VALID_ROLES.join(", ")
            ))));
        }
    }

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(user_id = id, role = %user.role, subject = %admin.subject, "User updated");

    Ok(Json(DataResponse { data: user }))
}

/// DELETE /api/v1/users/{id}
///
/// The user's apartments are removed with them.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !UserRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }

    tracing::info!(user_id = id, subject = %admin.subject, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}
