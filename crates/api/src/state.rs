use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Created once at startup and cloned into every request; the pool and the
/// config are both cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: filmlib_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
