use axum::{extract::State, http::StatusCode};

use carstore_core::health::readiness;

use crate::domain::repository::Store;
use crate::state::AppState;

pub use carstore_core::health::healthz;

/// 200 once the storage backend answers a ping, 503 otherwise.
pub async fn readyz<S: Store>(State(state): State<AppState<S>>) -> StatusCode {
    readiness(state.store.ping().await)
}
