use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use carstore_testing::fixture::review_payload;

use crate::helpers::{TestApp, bearer, create_car, register, spawn_app};

async fn post_review(app: &TestApp, token: &str, car_id: &str, rating: i32) -> axum_test::TestResponse {
    let (name, value) = bearer(token);
    app.server
        .post(&format!("/api/cars/{car_id}/reviews"))
        .add_header(name, value)
        .json(&review_payload(rating, "drove it for a week"))
        .await
}

#[tokio::test]
async fn should_average_reviews_of_car() {
    let app = spawn_app();
    let ada = register(&app, "ada").await;
    let car_id = create_car(&app, &ada.token, "Kia", 20000.0).await;
    for rating in [5, 3, 4] {
        post_review(&app, &ada.token, &car_id, rating)
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = app.server.get(&format!("/api/reviews?car_id={car_id}")).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["average_rating"], 4.0);
    assert_eq!(body["total_reviews"], 3);
    assert_eq!(body["reviews"].as_array().unwrap().len(), 3);
    assert_eq!(body["reviews"][0]["username"], "ada");

    let scoped: Value = app
        .server
        .get(&format!("/api/cars/{car_id}/reviews"))
        .await
        .json();
    assert_eq!(scoped, body);
}

#[tokio::test]
async fn should_report_zero_average_for_unreviewed_car() {
    let app = spawn_app();
    let body: Value = app
        .server
        .get(&format!("/api/reviews?car_id={}", Uuid::now_v7()))
        .await
        .json();
    assert_eq!(
        body,
        json!({ "reviews": [], "average_rating": 0.0, "total_reviews": 0 })
    );
}

#[tokio::test]
async fn should_reject_out_of_range_rating_without_persisting() {
    let app = spawn_app();
    let ada = register(&app, "ada").await;
    let car_id = create_car(&app, &ada.token, "Kia", 20000.0).await;

    for rating in [0, 6] {
        let response = post_review(&app, &ada.token, &car_id, rating).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Rating must be between 1 and 5");
    }

    let body: Value = app
        .server
        .get(&format!("/api/reviews?car_id={car_id}"))
        .await
        .json();
    assert_eq!(body["total_reviews"], 0);
}

#[tokio::test]
async fn should_take_car_id_from_query_before_body() {
    let app = spawn_app();
    let ada = register(&app, "ada").await;
    let query_car = create_car(&app, &ada.token, "Kia", 20000.0).await;
    let body_car = create_car(&app, &ada.token, "Fiat", 9000.0).await;

    let (name, value) = bearer(&ada.token);
    let response = app
        .server
        .post(&format!("/api/reviews?car_id={query_car}"))
        .add_header(name, value)
        .json(&json!({ "car_id": body_car, "rating": 4, "comment": "fine" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let review: Value = response.json();
    assert_eq!(review["car_id"], query_car);

    let (name, value) = bearer(&ada.token);
    let response = app
        .server
        .post("/api/reviews")
        .add_header(name, value)
        .json(&json!({ "car_id": body_car, "rating": 2, "comment": "meh" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let review: Value = response.json();
    assert_eq!(review["car_id"], body_car);
}

#[tokio::test]
async fn should_reject_missing_or_malformed_car_id() {
    let app = spawn_app();
    let ada = register(&app, "ada").await;

    let response = app.server.get("/api/reviews").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "car_id parameter is required");

    app.server
        .get("/api/reviews?car_id=xyz")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let response = post_review(&app, &ada.token, "xyz", 5).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid car ID");
}

#[tokio::test]
async fn should_report_bad_rating_before_missing_car_id() {
    let app = spawn_app();
    let ada = register(&app, "ada").await;

    let (name, value) = bearer(&ada.token);
    let response = app
        .server
        .post("/api/reviews")
        .add_header(name, value)
        .json(&json!({ "rating": 9, "comment": "no car" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Rating must be between 1 and 5");

    let response = post_review(&app, &ada.token, "xyz", 0).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Rating must be between 1 and 5");
}

#[tokio::test]
async fn should_hide_other_users_reviews_behind_not_found() {
    let app = spawn_app();
    let ada = register(&app, "ada").await;
    let bob = register(&app, "bob").await;
    let car_id = create_car(&app, &ada.token, "Kia", 20000.0).await;
    let review: Value = post_review(&app, &ada.token, &car_id, 4).await.json();
    let review_id = review["id"].as_str().unwrap();

    let (name, value) = bearer(&bob.token);
    let not_owner = app
        .server
        .put(&format!("/api/reviews/{review_id}"))
        .add_header(name, value)
        .json(&review_payload(1, "hijacked"))
        .await;

    let (name, value) = bearer(&bob.token);
    let missing = app
        .server
        .put(&format!("/api/reviews/{}", Uuid::now_v7()))
        .add_header(name, value)
        .json(&review_payload(1, "hijacked"))
        .await;

    not_owner.assert_status(StatusCode::NOT_FOUND);
    missing.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(not_owner.text(), missing.text());

    let (name, value) = bearer(&bob.token);
    app.server
        .delete(&format!("/api/reviews/{review_id}"))
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let stored: Value = app
        .server
        .get(&format!("/api/reviews/{review_id}"))
        .await
        .json();
    assert_eq!(stored["rating"], 4);
}

#[tokio::test]
async fn should_let_author_update_and_delete_review() {
    let app = spawn_app();
    let ada = register(&app, "ada").await;
    let car_id = create_car(&app, &ada.token, "Kia", 20000.0).await;
    let review: Value = post_review(&app, &ada.token, &car_id, 4).await.json();
    let review_id = review["id"].as_str().unwrap();

    let (name, value) = bearer(&ada.token);
    let response = app
        .server
        .put(&format!("/api/reviews/{review_id}"))
        .add_header(name, value)
        .json(&review_payload(2, "rust spots"))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Review updated successfully");

    let stored: Value = app
        .server
        .get(&format!("/api/reviews/{review_id}"))
        .await
        .json();
    assert_eq!(stored["rating"], 2);
    assert_eq!(stored["comment"], "rust spots");

    let (name, value) = bearer(&ada.token);
    let response = app
        .server
        .delete(&format!("/api/reviews/{review_id}"))
        .add_header(name, value)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Review deleted successfully");

    app.server
        .get(&format!("/api/reviews/{review_id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_reject_malformed_review_id() {
    let app = spawn_app();
    let response = app.server.get("/api/reviews/42").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid review ID");
}

#[tokio::test]
async fn should_keep_reviews_after_car_is_deleted() {
    let app = spawn_app();
    let ada = register(&app, "ada").await;
    let car_id = create_car(&app, &ada.token, "Kia", 20000.0).await;
    post_review(&app, &ada.token, &car_id, 5)
        .await
        .assert_status(StatusCode::CREATED);

    let (name, value) = bearer(&ada.token);
    app.server
        .delete(&format!("/api/cars/{car_id}"))
        .add_header(name, value)
        .await
        .assert_status_ok();

    let body: Value = app
        .server
        .get(&format!("/api/cars/{car_id}/reviews"))
        .await
        .json();
    assert_eq!(body["total_reviews"], 1);
}
