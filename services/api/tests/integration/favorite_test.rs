use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use carstore_api::domain::repository::{FavoriteRepository, Store};

use crate::helpers::{TestApp, bearer, create_car, register, spawn_app};

async fn add(app: &TestApp, token: &str, car_id: &str) -> axum_test::TestResponse {
    let (name, value) = bearer(token);
    app.server
        .post("/api/favorites")
        .add_header(name, value)
        .json(&json!({ "car_id": car_id }))
        .await
}

async fn count(app: &TestApp, token: &str) -> u64 {
    let (name, value) = bearer(token);
    let body: Value = app
        .server
        .get("/api/favorites/count")
        .add_header(name, value)
        .await
        .json();
    body["count"].as_u64().unwrap()
}

#[tokio::test]
async fn should_add_favorite_once() {
    let app = spawn_app();
    let ada = register(&app, "ada").await;
    let car_id = create_car(&app, &ada.token, "Kia", 20000.0).await;

    let first = add(&app, &ada.token, &car_id).await;
    first.assert_status_ok();
    let body: Value = first.json();
    assert_eq!(body["message"], "Added to favorites successfully");
    add(&app, &ada.token, &car_id).await.assert_status_ok();

    assert_eq!(count(&app, &ada.token).await, 1);
    let stored = app
        .store
        .favorites()
        .count(ada.user_id)
        .await
        .unwrap();
    assert_eq!(stored, 1);
}

#[tokio::test]
async fn should_list_favorites_with_cars() {
    let app = spawn_app();
    let ada = register(&app, "ada").await;
    let car_id = create_car(&app, &ada.token, "Mazda", 21000.0).await;
    add(&app, &ada.token, &car_id).await.assert_status_ok();

    let (name, value) = bearer(&ada.token);
    let response = app.server.get("/api/favorites").add_header(name, value).await;
    response.assert_status_ok();
    let favorites: Vec<Value> = response.json();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0]["car_id"], car_id);
    assert_eq!(favorites[0]["user_id"], ada.user_id.to_string());
    assert_eq!(favorites[0]["car"]["make"], "Mazda");
}

#[tokio::test]
async fn should_skip_favorite_whose_car_was_deleted() {
    let app = spawn_app();
    let ada = register(&app, "ada").await;
    let kept = create_car(&app, &ada.token, "Kia", 20000.0).await;
    let gone = create_car(&app, &ada.token, "Fiat", 9000.0).await;
    add(&app, &ada.token, &kept).await.assert_status_ok();
    add(&app, &ada.token, &gone).await.assert_status_ok();

    let (name, value) = bearer(&ada.token);
    app.server
        .delete(&format!("/api/cars/{gone}"))
        .add_header(name, value)
        .await
        .assert_status_ok();

    let (name, value) = bearer(&ada.token);
    let favorites: Vec<Value> = app
        .server
        .get("/api/favorites")
        .add_header(name, value)
        .await
        .json();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0]["car_id"], kept);
}

#[tokio::test]
async fn should_remove_missing_favorite_without_error() {
    let app = spawn_app();
    let ada = register(&app, "ada").await;

    let (name, value) = bearer(&ada.token);
    let response = app
        .server
        .delete(&format!("/api/favorites/{}", Uuid::now_v7()))
        .add_header(name, value)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Removed from favorites successfully");
}

#[tokio::test]
async fn should_report_favorite_status_per_user() {
    let app = spawn_app();
    let ada = register(&app, "ada").await;
    let bob = register(&app, "bob").await;
    let car_id = create_car(&app, &ada.token, "Kia", 20000.0).await;
    add(&app, &ada.token, &car_id).await.assert_status_ok();

    let (name, value) = bearer(&ada.token);
    let mine: Value = app
        .server
        .get(&format!("/api/favorites/{car_id}"))
        .add_header(name, value)
        .await
        .json();
    assert_eq!(mine, json!({ "car_id": car_id, "is_favorite": true }));

    let (name, value) = bearer(&bob.token);
    let theirs: Value = app
        .server
        .get(&format!("/api/favorites/{car_id}"))
        .add_header(name, value)
        .await
        .json();
    assert_eq!(theirs["is_favorite"], false);
    assert_eq!(count(&app, &bob.token).await, 0);
}

#[tokio::test]
async fn should_reject_malformed_car_id() {
    let app = spawn_app();
    let ada = register(&app, "ada").await;

    let response = add(&app, &ada.token, "not-an-id").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid car ID");

    let (name, value) = bearer(&ada.token);
    app.server
        .delete("/api/favorites/not-an-id")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_require_auth_for_favorites() {
    let app = spawn_app();
    app.server
        .get("/api/favorites")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    app.server
        .get("/api/favorites/count")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
