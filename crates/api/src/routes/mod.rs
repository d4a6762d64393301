//! Route definitions, one module per resource.

pub mod health;
pub mod tokens;
pub mod tunes;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /tunes                      list (tunes:read), create (tunes:write)
/// /tunes/{id}                 show (tunes:read), update/delete (tunes:write)
///
/// /users                      register (public)
/// /users/activate             redeem activation token (public)
/// /users/password             redeem password-reset token (public)
///
/// /tokens/authentication      login (public)
/// /tokens/password-reset      request reset token (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/tunes", tunes::router())
        .nest("/users", users::router())
        .nest("/tokens", tokens::router())
}
