//! Bearer-token authentication extractor.
//!
//! Resolves the `Authorization` header to an [`Identity`]. Identity derives
//! solely from the token: client-supplied user ids are never trusted.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tunebook_core::error::CoreError;
use tunebook_db::models::token::SCOPE_AUTHENTICATION;
use tunebook_db::models::Identity;
use tunebook_db::repositories::UserRepo;

use crate::auth::token::hash_token;
use crate::error::AppError;
use crate::state::AppState;

/// Error message for any credential that does not resolve. Invalid, expired,
/// and wrong-scope tokens are deliberately indistinguishable so callers
/// cannot probe which tokens exist.
const INVALID_TOKEN_MSG: &str = "invalid or expired authentication token";

/// The caller identity resolved for this request.
///
/// A missing `Authorization` header yields the anonymous identity; a
/// malformed one is a client error; a well-formed bearer value is hashed
/// and looked up against unexpired authentication-scope tokens.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = match parts.headers.get("authorization") {
            None => return Ok(CurrentUser(Identity::Anonymous)),
            Some(value) => value.to_str().map_err(|_| {
                AppError::Core(CoreError::Unauthenticated(
                    "invalid Authorization header".into(),
                ))
            })?,
        };

        let plaintext = header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthenticated(
                "invalid Authorization format, expected: Bearer <token>".into(),
            ))
        })?;

        let user = UserRepo::get_for_token(&state.pool, &hash_token(plaintext), SCOPE_AUTHENTICATION)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthenticated(INVALID_TOKEN_MSG.into()))
            })?;

        Ok(CurrentUser(Identity::Known(user)))
    }
}
