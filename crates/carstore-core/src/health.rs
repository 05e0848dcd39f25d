use axum::http::StatusCode;

/// Handler for `GET /healthz`: liveness only, never touches the store.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Map a readiness probe outcome to a status code.
pub fn readiness<E: std::fmt::Display>(probe: Result<(), E>) -> StatusCode {
    match probe {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            ::tracing::warn!(error = %e, "readiness probe failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
