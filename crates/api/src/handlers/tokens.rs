//! Handlers for the `/tokens` resource (login, password-reset requests).

use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use tunebook_core::error::CoreError;
use tunebook_core::validation::Validator;
use tunebook_db::models::token::{SCOPE_AUTHENTICATION, SCOPE_PASSWORD_RESET};
use tunebook_db::models::Token;
use tunebook_db::repositories::{TokenRepo, UserRepo};

use crate::auth::password::{validate_password, verify_password};
use crate::auth::token::generate_token;
use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::response::DataResponse;
use crate::state::AppState;

/// Authentication token lifetime.
const AUTH_TOKEN_TTL_HOURS: i64 = 24;

/// Password-reset token lifetime.
const RESET_TOKEN_TTL_MINS: i64 = 45;

/// Request body for `POST /v1/tokens/authentication`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /v1/tokens/password-reset`.
#[derive(Debug, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

/// POST /v1/tokens/authentication
///
/// Exchange email + password for a 24-hour bearer token. An unknown email
/// and a wrong password produce the same 401, so accounts cannot be
/// enumerated.
pub async fn create_authentication_token(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Token>>)> {
    let mut v = Validator::new();
    v.check(!input.email.is_empty(), "email", "must be provided");
    validate_password(&mut v, &input.password);
    v.into_result()?;

    let user = match UserRepo::get_by_email(&state.pool, &input.email).await {
        Ok(user) => user,
        Err(CoreError::NotFound) => return Err(invalid_credentials()),
        Err(other) => return Err(other.into()),
    };

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("password verification failed: {e}")))?;
    if !password_valid {
        return Err(invalid_credentials());
    }

    let token = generate_token(
        user.id,
        chrono::Duration::hours(AUTH_TOKEN_TTL_HOURS),
        SCOPE_AUTHENTICATION,
    );
    TokenRepo::insert(&state.pool, &token).await?;

    tracing::info!(user_id = user.id, "authentication token issued");

    Ok((StatusCode::CREATED, Json(DataResponse { data: token })))
}

/// POST /v1/tokens/password-reset
///
/// Issue a short-lived password-reset token for an activated account.
/// Email delivery is out of scope; the token is returned directly.
pub async fn create_password_reset_token(
    State(state): State<AppState>,
    Json(input): Json<PasswordResetRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Token>>)> {
    let mut v = Validator::new();
    v.check(!input.email.is_empty(), "email", "must be provided");
    v.into_result()?;

    let user = match UserRepo::get_by_email(&state.pool, &input.email).await {
        Ok(user) => user,
        Err(CoreError::NotFound) => {
            return Err(AppError::Core(CoreError::validation_field(
                "email",
                "no matching email address found",
            )))
        }
        Err(other) => return Err(other.into()),
    };

    if !user.activated {
        return Err(AppError::Core(CoreError::Forbidden(
            "your user account must be activated to reset your password".into(),
        )));
    }

    let token = generate_token(
        user.id,
        chrono::Duration::minutes(RESET_TOKEN_TTL_MINS),
        SCOPE_PASSWORD_RESET,
    );
    TokenRepo::insert(&state.pool, &token).await?;

    tracing::info!(user_id = user.id, "password reset token issued");

    Ok((StatusCode::ACCEPTED, Json(DataResponse { data: token })))
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthenticated(
        "invalid authentication credentials".into(),
    ))
}
