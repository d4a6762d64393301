//! Route definitions for user accounts.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// User routes mounted at `/users`.
///
/// ```text
/// POST /           -> register_user
/// PUT  /activate   -> activate_user
/// PUT  /password   -> update_user_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(users::register_user))
        .route("/activate", put(users::activate_user))
        .route("/password", put(users::update_user_password))
}
