use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use carstore_testing::auth::TestIdentity;
use carstore_testing::fixture::{login_payload, register_payload};

use crate::helpers::{bearer, register, spawn_app};

#[tokio::test]
async fn should_register_and_hide_password_hash() {
    let app = spawn_app();
    let response = app
        .server
        .post("/api/auth/register")
        .json(&register_payload("ada@example.com", "ada", "password123"))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["username"], "ada");
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn should_reject_duplicate_email_without_creating_user() {
    let app = spawn_app();
    register(&app, "ada").await;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&register_payload("ada@example.com", "ada2", "password123"))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"], "Email already registered");

    let login = app
        .server
        .post("/api/auth/login")
        .json(&login_payload("ada2", "password123"))
        .await;
    login.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_duplicate_username() {
    let app = spawn_app();
    register(&app, "ada").await;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&register_payload("other@example.com", "ada", "password123"))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"], "Username already taken");
}

#[tokio::test]
async fn should_reject_five_character_password() {
    let app = spawn_app();
    let response = app
        .server
        .post("/api/auth/register")
        .json(&register_payload("ada@example.com", "ada", "12345"))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Password must be at least 6 characters");
}

#[tokio::test]
async fn should_reject_malformed_body() {
    let app = spawn_app();
    let response = app
        .server
        .post("/api/auth/register")
        .text("{not json")
        .content_type("application/json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid request body");
}

#[tokio::test]
async fn should_answer_identically_for_wrong_password_and_unknown_user() {
    let app = spawn_app();
    register(&app, "ada").await;

    let wrong_password = app
        .server
        .post("/api/auth/login")
        .json(&login_payload("ada", "wrong-password"))
        .await;
    let unknown_user = app
        .server
        .post("/api/auth/login")
        .json(&login_payload("nobody", "password123"))
        .await;

    wrong_password.assert_status(StatusCode::UNAUTHORIZED);
    unknown_user.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.text(), unknown_user.text());
}

#[tokio::test]
async fn should_require_username_and_password_for_login() {
    let app = spawn_app();
    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "username": "ada" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_login_and_read_profile() {
    let app = spawn_app();
    register(&app, "ada").await;

    let login = app
        .server
        .post("/api/auth/login")
        .json(&login_payload("ada", "password123"))
        .await;
    login.assert_status_ok();
    let body: Value = login.json();
    let token = body["token"].as_str().unwrap();

    let (name, value) = bearer(token);
    let profile = app.server.get("/api/auth/profile").add_header(name, value).await;
    profile.assert_status_ok();
    let profile: Value = profile.json();
    assert_eq!(profile["username"], "ada");
    assert_eq!(profile["first_name"], "Test");
}

#[tokio::test]
async fn should_return_not_found_for_token_of_unknown_user() {
    let app = spawn_app();
    let token = TestIdentity::new(Uuid::now_v7(), "ghost").token();
    let (name, value) = bearer(&token);
    let response = app.server.get("/api/auth/profile").add_header(name, value).await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn should_update_profile_fields() {
    let app = spawn_app();
    let ada = register(&app, "ada").await;

    let (name, value) = bearer(&ada.token);
    let response = app
        .server
        .put("/api/auth/profile")
        .add_header(name, value)
        .json(&json!({ "phone": "555-0199", "last_name": "Byron" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["id"], ada.user_id.to_string());
    assert_eq!(body["phone"], "555-0199");
    assert_eq!(body["last_name"], "Byron");
    assert_eq!(body["username"], "ada");
}

#[tokio::test]
async fn should_reject_profile_update_to_taken_username() {
    let app = spawn_app();
    register(&app, "ada").await;
    let bob = register(&app, "bob").await;

    let (name, value) = bearer(&bob.token);
    let response = app
        .server
        .put("/api/auth/profile")
        .add_header(name, value)
        .json(&json!({ "username": "ada" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn should_reject_token_signed_with_other_secret() {
    let app = spawn_app();
    let ada = register(&app, "ada").await;
    let forged = TestIdentity::new(ada.user_id, "ada").token_with("some-other-secret", 3600);

    let (name, value) = bearer(&forged);
    let response = app.server.get("/api/auth/profile").add_header(name, value).await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"], "Unauthorized");
}
