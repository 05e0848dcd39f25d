pub mod auth;
pub mod car;
pub mod favorite;
pub mod health;
pub mod review;

use axum::http::{StatusCode, header::LOCATION};
use axum::response::IntoResponse;
use serde::Serialize;

use crate::error::ApiError;

/// `{"message": "..."}` acknowledgement for mutations with nothing else to return.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> axum::Json<Self> {
        axum::Json(Self { message })
    }
}

pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// 301 to the canonical collection URL.
pub fn moved_to(location: &'static str) -> impl IntoResponse {
    (StatusCode::MOVED_PERMANENTLY, [(LOCATION, location)])
}
