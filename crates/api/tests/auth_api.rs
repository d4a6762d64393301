//! End-to-end tests for authentication and account lifecycle.

mod common;

use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

use common::{body_json, build_test_app, registered_user, request};

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_authorization_header_is_401(pool: PgPool) {
    let app = build_test_app(pool);

    // Anything other than `Bearer <token>` counts as a failed attempt, not
    // as an anonymous request.
    let req = Request::builder()
        .method(Method::GET)
        .uri("/v1/tunes")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_bearer_token_is_401(pool: PgPool) {
    let app = build_test_app(pool);

    let response = request(
        &app,
        Method::GET,
        "/v1/tunes",
        None,
        Some("definitely-not-a-real-token"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid or expired authentication token");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unactivated_account_is_403(pool: PgPool) {
    let app = build_test_app(pool);

    // Register but skip activation. A token can still be issued; the
    // activation gate sits in front of the resources, not the login.
    let response = request(
        &app,
        Method::POST,
        "/v1/users",
        Some(json!({
            "name": "Dormant Picker",
            "email": "dormant@example.com",
            "password": "pa55word-long-enough",
        })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = request(
        &app,
        Method::POST,
        "/v1/tokens/authentication",
        Some(json!({
            "email": "dormant@example.com",
            "password": "pa55word-long-enough",
        })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let response = request(&app, Method::GET, "/v1/tunes", None, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn bad_credentials_are_indistinguishable(pool: PgPool) {
    let app = build_test_app(pool);
    let _ = registered_user(&app, "real@example.com").await;

    // Wrong password for a real account.
    let wrong_password = request(
        &app,
        Method::POST,
        "/v1/tokens/authentication",
        Some(json!({
            "email": "real@example.com",
            "password": "not-the-password",
        })),
        None,
    )
    .await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password = body_json(wrong_password).await;

    // Unknown account entirely.
    let unknown_email = request(
        &app,
        Method::POST,
        "/v1/tokens/authentication",
        Some(json!({
            "email": "nobody@example.com",
            "password": "pa55word-long-enough",
        })),
        None,
    )
    .await;
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    let unknown_email = body_json(unknown_email).await;

    // Same body either way, so the response leaks nothing about which
    // emails have accounts.
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password["error"], "invalid authentication credentials");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_email_is_a_field_error(pool: PgPool) {
    let app = build_test_app(pool);
    let _ = registered_user(&app, "taken@example.com").await;

    let response = request(
        &app,
        Method::POST,
        "/v1/users",
        Some(json!({
            "name": "Second Comer",
            "email": "taken@example.com",
            "password": "pa55word-long-enough",
        })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["error"]["email"], "a user with this email address already exists");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn activation_with_bogus_token_is_422(pool: PgPool) {
    let app = build_test_app(pool);

    let response = request(
        &app,
        Method::PUT,
        "/v1/users/activate",
        Some(json!({ "token": "never-issued" })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["error"]["token"], "invalid or expired activation token");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn password_reset_flow_rotates_the_password(pool: PgPool) {
    let app = build_test_app(pool);
    let _ = registered_user(&app, "forgetful@example.com").await;

    let response = request(
        &app,
        Method::POST,
        "/v1/tokens/password-reset",
        Some(json!({ "email": "forgetful@example.com" })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = body_json(response).await;
    let reset_token = body["data"]["token"].as_str().unwrap().to_string();

    let response = request(
        &app,
        Method::PUT,
        "/v1/users/password",
        Some(json!({
            "token": reset_token,
            "password": "a-brand-new-pa55word",
        })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Old password no longer works, new one does.
    let response = request(
        &app,
        Method::POST,
        "/v1/tokens/authentication",
        Some(json!({
            "email": "forgetful@example.com",
            "password": "pa55word-long-enough",
        })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = request(
        &app,
        Method::POST,
        "/v1/tokens/authentication",
        Some(json!({
            "email": "forgetful@example.com",
            "password": "a-brand-new-pa55word",
        })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn password_reset_requires_an_activated_account(pool: PgPool) {
    let app = build_test_app(pool);

    // Register without activating.
    let response = request(
        &app,
        Method::POST,
        "/v1/users",
        Some(json!({
            "name": "Unactivated Picker",
            "email": "limbo@example.com",
            "password": "pa55word-long-enough",
        })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = request(
        &app,
        Method::POST,
        "/v1/tokens/password-reset",
        Some(json!({ "email": "limbo@example.com" })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn password_reset_for_unknown_email_is_422(pool: PgPool) {
    let app = build_test_app(pool);

    let response = request(
        &app,
        Method::POST,
        "/v1/tokens/password-reset",
        Some(json!({ "email": "nobody@example.com" })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["error"]["email"], "no matching email address found");
}
