//! Route definitions for the tune catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::tunes;
use crate::state::AppState;

/// Tune routes mounted at `/tunes`.
///
/// ```text
/// GET    /          -> list_tunes   (tunes:read)
/// POST   /          -> create_tune  (tunes:write)
/// GET    /{id}      -> show_tune    (tunes:read)
/// PATCH  /{id}      -> update_tune  (tunes:write)
/// DELETE /{id}      -> delete_tune  (tunes:write)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tunes::list_tunes).post(tunes::create_tune))
        .route(
            "/{id}",
            get(tunes::show_tune)
                .patch(tunes::update_tune)
                .delete(tunes::delete_tune),
        )
}
