#![allow(clippy::expect_used)]

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn signup_returns_token_and_user() {
    let app = common::test_app().await;
    let (status, body) = common::post_json(
        &app.router,
        "/auth/signup",
        &json!({
            "email": "Buyer@Example.com",
            "username": "buyer",
            "password": "password123",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], "buyer@example.com");
    assert_eq!(body["user"]["username"], "buyer");
    assert!(body["user"].get("password_hash").is_none());
    assert!(!common::str_field(&body, "token").is_empty());
}

#[tokio::test]
async fn signup_reports_every_invalid_field() {
    let app = common::test_app().await;
    let (status, body) = common::post_json(
        &app.router,
        "/auth/signup",
        &json!({ "email": "nope", "username": "x", "password": "short" }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let fields = &body["error"]["fields"];
    assert!(fields["email"].is_string());
    assert!(fields["username"].is_string());
    assert!(fields["password"].is_string());
}

#[tokio::test]
async fn signup_rejects_duplicate_email() {
    let app = common::test_app().await;
    common::signup(&app.router, "first").await;

    let (status, _) = common::post_json(
        &app.router,
        "/auth/signup",
        &json!({
            "email": "first@example.com",
            "username": "second",
            "password": "password123",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn signin_with_correct_and_wrong_password() {
    let app = common::test_app().await;
    common::signup(&app.router, "buyer").await;

    let (status, body) = common::post_json(
        &app.router,
        "/auth/signin",
        &json!({ "email": "buyer@example.com", "password": "password123" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!common::str_field(&body, "token").is_empty());

    let (status, _) = common::post_json(
        &app.router,
        "/auth/signin",
        &json!({ "email": "buyer@example.com", "password": "wrong-password" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = common::post_json(
        &app.router,
        "/auth/signin",
        &json!({ "email": "nobody@example.com", "password": "password123" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_requires_valid_token() {
    let app = common::test_app().await;
    let token = common::signup(&app.router, "buyer").await;

    let (status, body) = common::get_auth(&app.router, "/auth/me", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "buyer");

    let (status, _) = common::get(&app.router, "/auth/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = common::get_auth(&app.router, "/auth/me", "garbage").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
