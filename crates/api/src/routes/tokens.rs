//! Route definitions for token issuance.

use axum::routing::post;
use axum::Router;

use crate::handlers::tokens;
use crate::state::AppState;

/// Token routes mounted at `/tokens`.
///
/// ```text
/// POST /authentication   -> create_authentication_token
/// POST /password-reset   -> create_password_reset_token
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/authentication", post(tokens::create_authentication_token))
        .route("/password-reset", post(tokens::create_password_reset_token))
}
