//! Route definitions for the `/cities` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::cities;
use crate::state::AppState;

/// Routes mounted at `/cities`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create (admin)
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update (admin)
/// DELETE /{id}      -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cities::list).post(cities::create))
        .route(
            "/{id}",
            get(cities::get_by_id).put(cities::update).delete(cities::delete),
        )
}
