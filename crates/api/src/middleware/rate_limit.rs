//! Rate-limit middleware: the first gate every request passes.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tunebook_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Admit or reject the request against the per-client limiter before any
/// other processing. Rejection short-circuits with a 429 body.
///
/// The client key is the remote IP from `ConnectInfo`. When the server is
/// driven without connection info (in-process test harnesses), there is no
/// client to meter and the request passes through.
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let remote = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    if let Some(ip) = remote {
        if !state.limiter.allow(ip) {
            tracing::debug!(client = %ip, "rate limit exceeded");
            return AppError::Core(CoreError::RateLimited).into_response();
        }
    }

    next.run(request).await
}
