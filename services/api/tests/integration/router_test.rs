use axum::http::{Method, StatusCode, header};
use serde_json::Value;

use crate::helpers::spawn_app;

#[tokio::test]
async fn should_answer_unknown_api_route_with_json_404() {
    let app = spawn_app();
    let response = app.server.get("/api/unknown").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn should_answer_wrong_method_with_json_405() {
    let app = spawn_app();
    let response = app.server.patch("/api/cars").await;
    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    let body: Value = response.json();
    assert_eq!(body["error"], "Method not allowed");
}

#[tokio::test]
async fn should_redirect_trailing_slash_collections() {
    let app = spawn_app();
    for (from, to) in [
        ("/api/cars/", "/api/cars"),
        ("/api/favorites/", "/api/favorites"),
        ("/api/reviews/", "/api/reviews"),
    ] {
        let response = app.server.get(from).await;
        response.assert_status(StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.header(header::LOCATION), to);
    }
}

#[tokio::test]
async fn should_answer_bare_options_with_empty_200() {
    let app = spawn_app();
    let response = app.server.method(Method::OPTIONS, "/api/cars").await;
    response.assert_status_ok();
    assert!(response.text().is_empty());
}

#[tokio::test]
async fn should_allow_any_origin() {
    let app = spawn_app();
    let response = app
        .server
        .get("/api/cars")
        .add_header(header::ORIGIN, header::HeaderValue::from_static("https://cars.example"))
        .await;
    response.assert_status_ok();
    assert_eq!(response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
}

#[tokio::test]
async fn should_tag_responses_with_request_id() {
    let app = spawn_app();
    let response = app.server.get("/healthz").await;
    response.assert_status_ok();
    let id = response.header("x-request-id");
    assert!(id.to_str().unwrap().parse::<uuid::Uuid>().is_ok());
}

#[tokio::test]
async fn should_report_ready_with_memory_store() {
    let app = spawn_app();
    app.server.get("/readyz").await.assert_status_ok();
}

#[tokio::test]
async fn should_serve_front_end_bundle() {
    let app = spawn_app();
    let response = app.server.get("/").await;
    response.assert_status_ok();
    assert!(response.text().contains("<html"));

    let missing = app.server.get("/no-such-page.html").await;
    missing.assert_status(StatusCode::NOT_FOUND);
    let body: Value = missing.json();
    assert_eq!(body["error"], "Not found");
}
