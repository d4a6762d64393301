//! Shared helpers for API integration tests.
//!
//! Builds the real application router (same middleware stack as
//! production) and provides small request/response helpers around
//! `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use tunebook_api::config::{RateLimitConfig, ServerConfig};
use tunebook_api::limiter::TokenBucketLimiter;
use tunebook_api::router::build_app_router;
use tunebook_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// The rate limiter is disabled so unrelated suites never trip it; limiter
/// behaviour has its own unit tests.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        rate_limit: RateLimitConfig {
            enabled: false,
            requests_per_second: 2.0,
            burst: 4.0,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_config(pool, test_config())
}

/// Same as [`build_test_app`] but with an explicit configuration, for suites
/// that need a live limiter or different CORS/timeout settings.
pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let limiter = Arc::new(TokenBucketLimiter::new(config.rate_limit.clone()));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        limiter,
    };

    build_app_router(state, &config)
}

/// Issue a request with an optional JSON body and optional bearer token.
pub async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

/// Consume a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        panic!(
            "body is not JSON ({e}): {}",
            String::from_utf8_lossy(&bytes)
        )
    })
}

/// Register and activate a user, returning `(user_id, auth_token)`.
///
/// Registration grants `tunes:read`; callers needing `tunes:write` use
/// [`grant_permission`] on top.
pub async fn registered_user(app: &Router, email: &str) -> (i64, String) {
    let response = request(
        app,
        Method::POST,
        "/v1/users",
        Some(serde_json::json!({
            "name": "Test Picker",
            "email": email,
            "password": "pa55word-long-enough",
        })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let user_id = body["data"]["user"]["id"].as_i64().unwrap();
    let activation_token = body["data"]["activation_token"]["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = request(
        app,
        Method::PUT,
        "/v1/users/activate",
        Some(serde_json::json!({ "token": activation_token })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = request(
        app,
        Method::POST,
        "/v1/tokens/authentication",
        Some(serde_json::json!({
            "email": email,
            "password": "pa55word-long-enough",
        })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let auth_token = body["data"]["token"].as_str().unwrap().to_string();

    (user_id, auth_token)
}

/// Grant an extra permission code to a user directly in the database.
pub async fn grant_permission(pool: &PgPool, user_id: i64, code: &str) {
    sqlx::query(
        "INSERT INTO users_permissions (user_id, permission_id) \
         SELECT $1, id FROM permissions WHERE code = $2",
    )
    .bind(user_id)
    .bind(code)
    .execute(pool)
    .await
    .unwrap();
}
