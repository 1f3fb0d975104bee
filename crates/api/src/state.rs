use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference counted and the config sits
/// behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: roomly_db::DbPool,
    /// Server configuration (JWT settings, default page size).
    pub config: Arc<ServerConfig>,
    /// Fired when the server starts shutting down. Listings still in
    /// flight at that point abort and answer 503.
    pub shutdown: CancellationToken,
}
