//! Handlers for the `/countries` resource.
//!
//! Reads are public. Writes require the admin role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use roomly_core::error::CoreError;
use roomly_core::types::DbId;
use roomly_db::models::country::{CountryListParams, CreateCountry, UpdateCountry};
use roomly_db::repositories::CountryRepo;
use roomly_db::specifications;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/countries
pub async fn list(
    State(state): State<AppState>,
    Query(paging): Query<PaginationParams>,
    Query(params): Query<CountryListParams>,
) -> AppResult<impl IntoResponse> {
    let spec = specifications::country_list(
        &params,
        paging.into_request(state.config.default_page_size),
    );
    let page = CountryRepo::list_page(&state.pool, &spec, &state.shutdown).await?;
    Ok(Json(page))
}

/// GET /api/v1/countries/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let country = CountryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Country",
            id,
        }))?;
    Ok(Json(DataResponse { data: country }))
}

/// POST /api/v1/countries
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCountry>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let country = CountryRepo::create(&state.pool, &input).await?;

    tracing::info!(country_id = country.id, subject = %admin.subject, "Country created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: country })))
}

/// PUT /api/v1/countries/{id}
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCountry>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let country = CountryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Country",
            id,
        }))?;

    tracing::info!(country_id = id, subject = %admin.subject, "Country updated");

    Ok(Json(DataResponse { data: country }))
}

/// DELETE /api/v1/countries/{id}
///
/// Rejected with 409 while cities still reference the country.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CountryRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Country",
            id,
        }));
    }

    tracing::info!(country_id = id, subject = %admin.subject, "Country deleted");

    Ok(StatusCode::NO_CONTENT)
}
