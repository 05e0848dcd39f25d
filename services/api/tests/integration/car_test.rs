use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use carstore_testing::fixture::car_payload;

use crate::helpers::{anonymous_token, bearer, create_car, spawn_app};

#[tokio::test]
async fn should_return_created_car_unchanged() {
    let app = spawn_app();
    let (name, value) = bearer(&anonymous_token());
    let created = app
        .server
        .post("/api/cars")
        .add_header(name, value)
        .json(&car_payload("Toyota", "Corolla", 2019, 15500.0))
        .await;
    created.assert_status(StatusCode::CREATED);
    let created: Value = created.json();

    let fetched = app
        .server
        .get(&format!("/api/cars/{}", created["id"].as_str().unwrap()))
        .await;
    fetched.assert_status_ok();
    let fetched: Value = fetched.json();
    assert_eq!(fetched, created);
    assert_eq!(fetched["make"], "Toyota");
    assert_eq!(fetched["model"], "Corolla");
    assert_eq!(fetched["price"], 15500.0);
    assert_eq!(fetched["engine_size"], 1.6);
}

#[tokio::test]
async fn should_require_auth_to_create_car() {
    let app = spawn_app();
    let response = app
        .server
        .post("/api/cars")
        .json(&car_payload("Toyota", "Corolla", 2019, 15500.0))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn should_reject_car_before_1900_and_non_positive_price() {
    let app = spawn_app();
    let token = anonymous_token();

    for payload in [
        car_payload("Ford", "Quadricycle", 1896, 1000.0),
        car_payload("Ford", "Focus", 2015, 0.0),
        car_payload("", "Focus", 2015, 1000.0),
    ] {
        let (name, value) = bearer(&token);
        let response = app
            .server
            .post("/api/cars")
            .add_header(name, value)
            .json(&payload)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    let all: Value = app.server.get("/api/cars").await.json();
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn should_filter_cars_on_all_predicates() {
    let app = spawn_app();
    let token = anonymous_token();
    for (make, body_type, price) in [
        ("Kia", "suv", 30000.0),
        ("BMW", "suv", 60000.0),
        ("Audi", "sedan", 30000.0),
        ("Dacia", "suv", 15000.0),
    ] {
        let mut payload = car_payload(make, "Model", 2020, price);
        payload["body_type"] = json!(body_type);
        let (name, value) = bearer(&token);
        app.server
            .post("/api/cars")
            .add_header(name, value)
            .json(&payload)
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = app
        .server
        .get("/api/cars?minPrice=20000&maxPrice=50000&bodyType=suv")
        .await;
    response.assert_status_ok();
    let cars: Vec<Value> = response.json();
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0]["make"], "Kia");

    let snake: Vec<Value> = app
        .server
        .get("/api/cars?min_price=20000&max_price=50000&body_type=suv")
        .await
        .json();
    assert_eq!(snake, cars);

    let both: Vec<Value> = app
        .server
        .get("/api/cars?body_type=suv&bodyType=suv&minPrice=20000&max_price=50000")
        .await
        .json();
    assert_eq!(both, cars);
}

#[tokio::test]
async fn should_ignore_empty_filters_and_reject_bad_numbers() {
    let app = spawn_app();
    create_car(&app, &anonymous_token(), "Kia", 20000.0).await;

    let cars: Vec<Value> = app.server.get("/api/cars?make=&min_year=").await.json();
    assert_eq!(cars.len(), 1);

    let response = app.server.get("/api/cars?min_year=soon").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid query parameters");
}

#[tokio::test]
async fn should_patch_only_given_fields() {
    let app = spawn_app();
    let token = anonymous_token();
    let id = create_car(&app, &token, "Kia", 20000.0).await;

    let (name, value) = bearer(&token);
    let response = app
        .server
        .put(&format!("/api/cars/{id}"))
        .add_header(name, value)
        .json(&json!({ "price": 18500.0 }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Car updated successfully");

    let car: Value = app.server.get(&format!("/api/cars/{id}")).await.json();
    assert_eq!(car["price"], 18500.0);
    assert_eq!(car["mileage"], 12000);
    assert_eq!(car["description"], "one owner");
}

#[tokio::test]
async fn should_reject_update_to_non_positive_price() {
    let app = spawn_app();
    let token = anonymous_token();
    let id = create_car(&app, &token, "Kia", 20000.0).await;

    let (name, value) = bearer(&token);
    let response = app
        .server
        .put(&format!("/api/cars/{id}"))
        .add_header(name, value)
        .json(&json!({ "price": -1.0 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_answer_not_found_for_unknown_or_malformed_car_id() {
    let app = spawn_app();
    let token = anonymous_token();

    let missing = app.server.get(&format!("/api/cars/{}", Uuid::now_v7())).await;
    missing.assert_status(StatusCode::NOT_FOUND);
    let body: Value = missing.json();
    assert_eq!(body["error"], "Car not found");

    app.server
        .get("/api/cars/not-an-id")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let (name, value) = bearer(&token);
    app.server
        .put(&format!("/api/cars/{}", Uuid::now_v7()))
        .add_header(name, value)
        .json(&json!({ "mileage": 10 }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let (name, value) = bearer(&token);
    app.server
        .delete(&format!("/api/cars/{}", Uuid::now_v7()))
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_delete_car() {
    let app = spawn_app();
    let token = anonymous_token();
    let id = create_car(&app, &token, "Kia", 20000.0).await;

    let (name, value) = bearer(&token);
    let response = app
        .server
        .delete(&format!("/api/cars/{id}"))
        .add_header(name, value)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Car deleted successfully");

    app.server
        .get(&format!("/api/cars/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
