//! Handlers for the `/users` resource (registration, activation, password).

use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tunebook_core::error::CoreError;
use tunebook_core::permissions::PERMISSION_TUNES_READ;
use tunebook_core::validation::Validator;
use tunebook_db::models::token::{SCOPE_ACTIVATION, SCOPE_PASSWORD_RESET};
use tunebook_db::models::{Token, User};
use tunebook_db::repositories::{PermissionRepo, TokenRepo, UserRepo};

use crate::auth::password::{hash_password, validate_password};
use crate::auth::token::{generate_token, hash_token};
use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::response::DataResponse;
use crate::state::AppState;

/// Activation token lifetime.
const ACTIVATION_TOKEN_TTL_DAYS: i64 = 3;

/// Maximum name length in bytes.
const MAX_NAME_BYTES: usize = 500;

/// Request body for `POST /v1/users`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Response for `POST /v1/users`.
///
/// Email delivery is out of scope, so the activation token rides along in
/// the registration response.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: User,
    pub activation_token: Token,
}

/// Request body for `PUT /v1/users/activate`.
#[derive(Debug, Deserialize)]
pub struct ActivateRequest {
    pub token: String,
}

/// Request body for `PUT /v1/users/password`.
#[derive(Debug, Deserialize)]
pub struct UpdatePasswordRequest {
    pub token: String,
    pub password: String,
}

/// Record validation failures for a registration payload.
fn validate_registration(v: &mut Validator, input: &RegisterRequest) {
    v.check(!input.name.is_empty(), "name", "must be provided");
    v.check(
        input.name.len() <= MAX_NAME_BYTES,
        "name",
        "must not be more than 500 bytes long",
    );
    validate_email(v, &input.email);
    validate_password(v, &input.password);
}

/// Minimal email shape check. Deliverability is proven by the activation
/// round trip, not by the grammar.
fn validate_email(v: &mut Validator, email: &str) {
    v.check(!email.is_empty(), "email", "must be provided");
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    };
    v.check(well_formed, "email", "must be a valid email address");
}

/// POST /v1/users
///
/// Register a new, unactivated account: hash the password, store the user,
/// grant the default read permission, and issue an activation token.
pub async fn register_user(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<RegisterResponse>>)> {
    let mut v = Validator::new();
    validate_registration(&mut v, &input);
    v.into_result()?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("password hashing failed: {e}")))?;

    let user = UserRepo::insert(&state.pool, &input.name, &input.email, &password_hash).await?;

    PermissionRepo::add_for_user(&state.pool, user.id, &[PERMISSION_TUNES_READ]).await?;

    let activation_token = generate_token(
        user.id,
        chrono::Duration::days(ACTIVATION_TOKEN_TTL_DAYS),
        SCOPE_ACTIVATION,
    );
    TokenRepo::insert(&state.pool, &activation_token).await?;

    tracing::info!(user_id = user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: RegisterResponse {
                user,
                activation_token,
            },
        }),
    ))
}

/// PUT /v1/users/activate
///
/// Redeem an activation token: mark the owning account activated and burn
/// every outstanding activation token for it.
pub async fn activate_user(
    State(state): State<AppState>,
    Json(input): Json<ActivateRequest>,
) -> AppResult<Json<DataResponse<User>>> {
    let mut v = Validator::new();
    v.check(!input.token.is_empty(), "token", "must be provided");
    v.into_result()?;

    let mut user = UserRepo::get_for_token(&state.pool, &hash_token(&input.token), SCOPE_ACTIVATION)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::validation_field(
                "token",
                "invalid or expired activation token",
            ))
        })?;

    UserRepo::activate(&state.pool, user.id).await?;
    user.activated = true;

    TokenRepo::delete_all_for_user(&state.pool, SCOPE_ACTIVATION, user.id).await?;

    tracing::info!(user_id = user.id, "user activated");

    Ok(Json(DataResponse { data: user }))
}

/// PUT /v1/users/password
///
/// Redeem a password-reset token: store the new password hash and burn
/// every outstanding reset token for the account.
pub async fn update_user_password(
    State(state): State<AppState>,
    Json(input): Json<UpdatePasswordRequest>,
) -> AppResult<Json<DataResponse<&'static str>>> {
    let mut v = Validator::new();
    v.check(!input.token.is_empty(), "token", "must be provided");
    validate_password(&mut v, &input.password);
    v.into_result()?;

    let user = UserRepo::get_for_token(
        &state.pool,
        &hash_token(&input.token),
        SCOPE_PASSWORD_RESET,
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::validation_field(
            "token",
            "invalid or expired password reset token",
        ))
    })?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("password hashing failed: {e}")))?;

    UserRepo::update_password(&state.pool, user.id, &password_hash).await?;
    TokenRepo::delete_all_for_user(&state.pool, SCOPE_PASSWORD_RESET, user.id).await?;

    tracing::info!(user_id = user.id, "password updated");

    Ok(Json(DataResponse {
        data: "your password was successfully reset",
    }))
}
