use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; no per-request data lives here. The acting user is
/// threaded through handlers as an extractor, never stored on the state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: eduportal_db::DbPool,
    /// Server configuration (JWT + capability token secrets included).
    pub config: Arc<ServerConfig>,
}
