//! Handlers for the `/cities` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use roomly_core::error::CoreError;
use roomly_core::types::DbId;
use roomly_db::models::city::{CityListParams, CreateCity, UpdateCity};
use roomly_db::repositories::CityRepo;
use roomly_db::specifications;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/cities
///
/// Optional `country_id` and `search` (name substring) filters.
pub async fn list(
    State(state): State<AppState>,
    Query(paging): Query<PaginationParams>,
    Query(params): Query<CityListParams>,
) -> AppResult<impl IntoResponse> {
    let spec = specifications::city_list(&params, paging.into_request(state.config.default_page_size));
    let page = CityRepo::list_page(&state.pool, &spec, &state.shutdown).await?;
    Ok(Json(page))
}

/// GET /api/v1/cities/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let city = CityRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "City", id }))?;
    Ok(Json(DataResponse { data: city }))
}

/// POST /api/v1/cities
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCity>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let city = CityRepo::create(&state.pool, &input).await?;

    tracing::info!(
        city_id = city.id,
        country_id = city.country_id,
        subject = %admin.subject,
        "City created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: city })))
}

/// PUT /api/v1/cities/{id}
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCity>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let city = CityRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "City", id }))?;

    tracing::info!(city_id = id, subject = %admin.subject, "City updated");

    Ok(Json(DataResponse { data: city }))
}

/// DELETE /api/v1/cities/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CityRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "City", id }));
    }

    tracing::info!(city_id = id, subject = %admin.subject, "City deleted");

    Ok(StatusCode::NO_CONTENT)
}
