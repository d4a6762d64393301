use std::sync::Arc;

use crate::config::ServerConfig;
use crate::limiter::TokenBucketLimiter;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable: inner data is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: tunebook_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Per-client request limiter. Constructed once at startup and threaded
    /// through the pipeline; the only mutable process-wide state.
    pub limiter: Arc<TokenBucketLimiter>,
}
