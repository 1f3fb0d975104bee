//! Handlers scoped to the calling user (`/me`).

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use roomly_db::models::apartment::ApartmentListParams;
use roomly_db::repositories::ApartmentRepo;
use roomly_db::specifications;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireLandlord;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/me
///
/// Syncs the caller's local row from the token and returns it.
pub async fn get_me(user: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let me = user.sync(&state.pool).await?;
    Ok(Json(DataResponse { data: me }))
}

/// GET /api/v1/me/apartments
///
/// Landlord dashboard: the apartment listing pinned to the caller. Any
/// `landlord_id` in the query string is ignored.
pub async fn my_apartments(
    RequireLandlord(user): RequireLandlord,
    State(state): State<AppState>,
    Query(paging): Query<PaginationParams>,
    Query(params): Query<ApartmentListParams>,
) -> AppResult<impl IntoResponse> {
    let me = user.sync(&state.pool).await?;
    let spec = specifications::landlord_apartments(
        me.id,
        &params,
        paging.into_request(state.config.default_page_size),
    );
    let page = ApartmentRepo::list_page(&state.pool, &spec, &state.shutdown).await?;
    Ok(Json(page))
}
