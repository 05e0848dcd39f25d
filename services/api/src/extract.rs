//! Request extractors whose rejections render as [`ApiError`].

use axum::extract::{FromRequest, FromRequestParts};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::ApiError;

/// `axum::Json` that rejects with `{"error": "Invalid request body"}`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string decoded with `serde_qs`. A missing query string decodes as `T::default()`.
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = ApiError;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let decoded = match parts.uri.query() {
            Some(raw) if !raw.is_empty() => serde_qs::from_str::<T>(raw).map_err(|e| {
                tracing::debug!(error = %e, "query string rejected");
                ApiError::InvalidQuery
            }),
            _ => Ok(T::default()),
        };

        async move { decoded.map(ApiQuery) }
    }
}

/// Parse a path segment as a UUID, mapping failure to `invalid`.
pub(crate) fn parse_id(raw: &str, invalid: ApiError) -> Result<Uuid, ApiError> {
    raw.parse().map_err(|_| invalid)
}
