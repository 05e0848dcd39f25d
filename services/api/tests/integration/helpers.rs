use std::path::PathBuf;

use axum::http::{HeaderName, HeaderValue, header::AUTHORIZATION};
use axum_test::TestServer;
use serde_json::Value;
use uuid::Uuid;

use carstore_api::infra::bounded::Budgets;
use carstore_api::infra::memory::MemoryStore;
use carstore_api::infra::password::PasswordService;
use carstore_api::router::build_router;
use carstore_api::state::AppState;
use carstore_api::usecase::auth::TokenKeys;
use carstore_testing::auth::{TEST_JWT_SECRET, TestIdentity};
use carstore_testing::fixture::{car_payload, register_payload};

// ── TestApp ──────────────────────────────────────────────────────────────────

pub struct TestApp {
    pub server: TestServer,
    pub store: MemoryStore,
}

/// Full router over a fresh in-memory store, with cheap password hashing.
pub fn spawn_app() -> TestApp {
    let store = MemoryStore::new();
    let state = AppState {
        store: store.clone(),
        budgets: Budgets::default(),
        passwords: PasswordService::new(4).unwrap(),
        keys: TokenKeys {
            secret: TEST_JWT_SECRET.to_string(),
            ttl_secs: 3600,
        },
        static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"),
    };
    let server = TestServer::new(build_router(state)).unwrap();
    TestApp { server, store }
}

pub fn bearer(token: &str) -> (HeaderName, HeaderValue) {
    (
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    )
}

/// Token for a user id with no stored account; enough for routes that never load the user.
pub fn anonymous_token() -> String {
    TestIdentity::new(Uuid::now_v7(), "ghost").token()
}

pub struct Registered {
    pub token: String,
    pub user_id: Uuid,
}

pub async fn register(app: &TestApp, username: &str) -> Registered {
    let response = app
        .server
        .post("/api/auth/register")
        .json(&register_payload(
            &format!("{username}@example.com"),
            username,
            "password123",
        ))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let body: Value = response.json();
    Registered {
        token: body["token"].as_str().unwrap().to_string(),
        user_id: body["user"]["id"].as_str().unwrap().parse().unwrap(),
    }
}

/// Creates a car and returns its id.
pub async fn create_car(app: &TestApp, token: &str, make: &str, price: f64) -> String {
    let (name, value) = bearer(token);
    let response = app
        .server
        .post("/api/cars")
        .add_header(name, value)
        .json(&car_payload(make, "Model", 2020, price))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let body: Value = response.json();
    body["id"].as_str().unwrap().to_string()
}
