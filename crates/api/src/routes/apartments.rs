//! Route definitions for the `/apartments` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::apartments;
use crate::state::AppState;

/// Routes mounted at `/apartments`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create (landlord or admin)
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update (owning landlord or admin)
/// DELETE /{id}      -> delete (owning landlord or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(apartments::list).post(apartments::create))
        .route(
            "/{id}",
            get(apartments::get_by_id)
                .put(apartments::update)
                .delete(apartments::delete),
        )
}
