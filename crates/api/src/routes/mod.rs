pub mod apartments;
pub mod cities;
pub mod countries;
pub mod health;
pub mod me;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /countries                    list, create (admin)
/// /countries/{id}               get, update, delete (admin)
///
/// /cities                       list, create (admin)
/// /cities/{id}                  get, update, delete (admin)
///
/// /apartments                   list, create (landlord)
/// /apartments/{id}              get, update, delete (owner or admin)
///
/// /me                           current user, synced from the token
/// /me/apartments                landlord dashboard listing
///
/// /users                        list (admin only)
/// /users/{id}                   get, update, delete (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/countries", countries::router())
        .nest("/cities", cities::router())
        .nest("/apartments", apartments::router())
        .nest("/me", me::router())
        .nest("/users", users::router())
}
