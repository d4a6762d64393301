//! Authorization gate extractors.
//!
//! Each extractor wraps the previous gate: [`RequireActivated`] wraps
//! [`CurrentUser`], and the permission extractors wrap [`RequireActivated`]
//! plus an exact-membership check against the user's permission set.
//! Unauthenticated (401) and Forbidden (403) are always distinct: "log in"
//! and "you may not do this" are different instructions to the caller.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tunebook_core::error::CoreError;
use tunebook_core::permissions::{PERMISSION_TUNES_READ, PERMISSION_TUNES_WRITE};
use tunebook_db::models::{Identity, User};
use tunebook_db::repositories::PermissionRepo;

use super::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires a non-anonymous, activated account.
///
/// Anonymous callers get 401 ("log in"); authenticated but unactivated
/// accounts get 403 ("check your email").
pub struct RequireActivated(pub User);

impl FromRequestParts<AppState> for RequireActivated {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(identity) = CurrentUser::from_request_parts(parts, state).await?;
        match identity {
            Identity::Anonymous => Err(AppError::Core(CoreError::Unauthenticated(
                "you must be authenticated to access this resource".into(),
            ))),
            Identity::Known(user) if !user.activated => Err(AppError::Core(CoreError::Forbidden(
                "your user account must be activated to access this resource".into(),
            ))),
            Identity::Known(user) => Ok(RequireActivated(user)),
        }
    }
}

/// Apply the activation gate, then check exact membership of `code` in the
/// user's permission set.
///
/// Absence is Forbidden, never NotFound: the same status comes back whether
/// or not the underlying resource exists, so private resources cannot be
/// enumerated.
async fn require_permission(
    parts: &mut Parts,
    state: &AppState,
    code: &str,
) -> Result<User, AppError> {
    let RequireActivated(user) = RequireActivated::from_request_parts(parts, state).await?;

    let permissions = PermissionRepo::get_all_for_user(&state.pool, user.id).await?;
    if !permissions.iter().any(|held| held == code) {
        return Err(AppError::Core(CoreError::Forbidden(
            "your user account doesn't have the necessary permissions to access this resource"
                .into(),
        )));
    }

    Ok(user)
}

/// Requires the `tunes:read` permission.
///
/// ```ignore
/// async fn list_tunes(RequireTunesRead(user): RequireTunesRead) -> AppResult<Json<()>> {
///     // user is guaranteed activated and permitted here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireTunesRead(pub User);

impl FromRequestParts<AppState> for RequireTunesRead {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = require_permission(parts, state, PERMISSION_TUNES_READ).await?;
        Ok(RequireTunesRead(user))
    }
}

/// Requires the `tunes:write` permission.
pub struct RequireTunesWrite(pub User);

impl FromRequestParts<AppState> for RequireTunesWrite {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = require_permission(parts, state, PERMISSION_TUNES_WRITE).await?;
        Ok(RequireTunesWrite(user))
    }
}
