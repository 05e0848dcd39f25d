//! JSON request bodies used across integration tests.

use serde_json::{Value, json};

pub fn car_payload(make: &str, model: &str, year: i32, price: f64) -> Value {
    json!({
        "make": make,
        "model": model,
        "year": year,
        "price": price,
        "mileage": 12000,
        "color": "blue",
        "fuel_type": "petrol",
        "transmission": "manual",
        "engine_size": 1.6,
        "horsepower": 120,
        "body_type": "hatchback",
        "description": "one owner",
        "image_url": "https://img.example.com/car.jpg"
    })
}

pub fn register_payload(email: &str, username: &str, password: &str) -> Value {
    json!({
        "email": email,
        "username": username,
        "password": password,
        "first_name": "Test",
        "last_name": "User",
        "phone": "555-0100"
    })
}

pub fn login_payload(username: &str, password: &str) -> Value {
    json!({ "username": username, "password": password })
}

pub fn review_payload(rating: i32, comment: &str) -> Value {
    json!({ "rating": rating, "comment": comment })
}
