//! Handlers for the `/apartments` resource.
//!
//! Browsing is public. Landlords (and admins) create listings; only the
//! owning landlord or an admin may change or remove one.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use roomly_core::error::CoreError;
use roomly_core::types::DbId;
use roomly_db::models::apartment::{
    Apartment, ApartmentListParams, CreateApartment, UpdateApartment,
};
use roomly_db::repositories::ApartmentRepo;
use roomly_db::specifications;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireLandlord;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/apartments
///
/// Filters: `city_id`, `landlord_id`, `min_price`, `max_price`,
/// `min_bedrooms`, `available`, `search`. Ordering via `sort`
/// (`newest`, `price_asc`, `price_desc`, `bedrooms_desc`). Cursor mode
/// always orders by id, so the `lastCursor` of a `newest` page is followed
/// with `direction=Backward`.
pub async fn list(
    State(state): State<AppState>,
    Query(paging): Query<PaginationParams>,
    Query(params): Query<ApartmentListParams>,
) -> AppResult<impl IntoResponse> {
    let spec = specifications::apartment_list(
        &params,
        paging.into_request(state.config.default_page_size),
    );
    let page = ApartmentRepo::list_page(&state.pool, &spec, &state.shutdown).await?;
    Ok(Json(page))
}

/// GET /api/v1/apartments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let apartment = find_apartment(&state, id).await?;
    Ok(Json(DataResponse { data: apartment }))
}

/// POST /api/v1/apartments
///
/// The listing is owned by the caller's local user row.
pub async fn create(
    RequireLandlord(user): RequireLandlord,
    State(state): State<AppState>,
    Json(input): Json<CreateApartment>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let landlord = user.sync(&state.pool).await?;
    let apartment = ApartmentRepo::create(&state.pool, landlord.id, &input).await?;

    tracing::info!(
        apartment_id = apartment.id,
        landlord_id = landlord.id,
        city_id = apartment.city_id,
        "Apartment created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: apartment })))
}

/// PUT /api/v1/apartments/{id}
pub async fn update(
    RequireLandlord(user): RequireLandlord,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateApartment>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let existing = find_apartment(&state, id).await?;
    ensure_can_manage(&state, &user, &existing).await?;

    let apartment = ApartmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Apartment",
            id,
        }))?;

    tracing::info!(apartment_id = id, subject = %user.subject, "Apartment updated");

    Ok(Json(DataResponse { data: apartment }))
}

/// DELETE /api/v1/apartments/{id}
pub async fn delete(
    RequireLandlord(user): RequireLandlord,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = find_apartment(&state, id).await?;
    ensure_can_manage(&state, &user, &existing).await?;

    if !ApartmentRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Apartment",
            id,
        }));
    }

    tracing::info!(apartment_id = id, subject = %user.subject, "Apartment deleted");

    Ok(StatusCode::NO_CONTENT)
}

async fn find_apartment(state: &AppState, id: DbId) -> AppResult<Apartment> {
    ApartmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Apartment",
            id,
        }))
}

/// Admins manage every listing; landlords only their own.
async fn ensure_can_manage(
    state: &AppState,
    user: &AuthUser,
    apartment: &Apartment,
) -> AppResult<()> {
    if user.is_admin() {
        return Ok(());
    }
    let local = user.sync(&state.pool).await?;
    if local.id != apartment.landlord_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the owning landlord may modify this apartment".into(),
        )));
    }
    Ok(())
}
