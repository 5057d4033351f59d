use axum::http::{header, HeaderValue, StatusCode};
use serde_json::{json, Value};

mod common;

use common::spawn_app;

const PASSWORD: &str = "correct-horse-battery";

#[tokio::test]
async fn register_returns_a_usable_token() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({ "email": "  Buyer@Example.com ", "password": PASSWORD, "name": "Abebe" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["user"]["email"], json!("buyer@example.com"));
    assert_eq!(body["user"]["name"], json!("Abebe"));
    assert_eq!(body["user"]["role"], json!("USER"));
    assert!(body["user"].get("password_hash").is_none());

    let token = body["token"].as_str().unwrap();
    let me = app.server.get("/api/auth/me").authorization_bearer(token).await;
    me.assert_status_ok();
    assert_eq!(me.json::<Value>()["id"], body["user"]["id"]);
}

#[tokio::test]
async fn register_rejects_duplicates_and_weak_input() {
    let app = spawn_app().await;
    let payload = json!({ "email": "agent@example.com", "password": PASSWORD });

    app.server
        .post("/api/auth/register")
        .json(&payload)
        .await
        .assert_status(StatusCode::CREATED);

    let duplicate = app
        .server
        .post("/api/auth/register")
        .json(&json!({ "email": "AGENT@example.com", "password": PASSWORD }))
        .await;
    duplicate.assert_status(StatusCode::CONFLICT);
    assert_eq!(duplicate.json::<Value>()["error"], json!("Email already registered"));

    let weak = app
        .server
        .post("/api/auth/register")
        .json(&json!({ "email": "not-an-email", "password": "short" }))
        .await;
    weak.assert_status(StatusCode::BAD_REQUEST);
    let fields = weak.json::<Value>()["fields"].clone();
    assert!(fields["email"].is_array());
    assert!(fields["password"].is_array());

    app.server
        .post("/api/auth/register")
        .json(&json!({ "email": "missing-password@example.com" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_does_not_reveal_which_part_was_wrong() {
    let app = spawn_app().await;
    app.server
        .post("/api/auth/register")
        .json(&json!({ "email": "agent@example.com", "password": PASSWORD }))
        .await
        .assert_status(StatusCode::CREATED);

    let ok = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "Agent@Example.com", "password": PASSWORD }))
        .await;
    ok.assert_status_ok();
    assert!(ok.json::<Value>()["token"].as_str().is_some());

    let wrong_password = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "agent@example.com", "password": "wrong-password" }))
        .await;
    let unknown_email = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "ghost@example.com", "password": PASSWORD }))
        .await;

    wrong_password.assert_status(StatusCode::UNAUTHORIZED);
    unknown_email.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.json::<Value>(), unknown_email.json::<Value>());
}

#[tokio::test]
async fn me_distinguishes_missing_and_malformed_headers() {
    let app = spawn_app().await;

    let missing = app.server.get("/api/auth/me").await;
    missing.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(missing.json::<Value>()["error"], json!("Authorization header required"));

    let malformed = app
        .server
        .get("/api/auth/me")
        .add_header(header::AUTHORIZATION, HeaderValue::from_static("Token abc"))
        .await;
    malformed.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(malformed.json::<Value>()["error"], json!("Invalid Authorization format"));
}
