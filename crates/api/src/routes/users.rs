//! Route definitions for the admin `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`. All require the admin role.
///
/// ```text
/// GET    /          -> list
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(users::list)).route(
        "/{id}",
        get(users::get_by_id).put(users::update).delete(users::delete),
    )
}
