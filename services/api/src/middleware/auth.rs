//! Bearer-token auth gate.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use carstore_auth_types::{bearer::bearer_token, token::validate_token};
use carstore_domain::user::UserRole;

use crate::domain::repository::Store;
use crate::error::ApiError;
use crate::state::AppState;

/// Identity of the caller, placed in request extensions by [`require_auth`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub username: String,
    pub role: UserRole,
}

/// Rejects with 401 unless the request carries `Authorization: Bearer <token>` with a
/// valid, unexpired token.
pub async fn require_auth<S: Store>(
    State(state): State<AppState<S>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = bearer_token(request.headers())
        .and_then(|token| validate_token(token, state.jwt_secret()))
        .map_err(|e| {
            tracing::debug!(reason = %e, "request rejected by auth gate");
            ApiError::Unauthorized
        })?;

    request.extensions_mut().insert(AuthUser {
        user_id: identity.user_id,
        email: identity.email,
        username: identity.username,
        role: identity.role,
    });
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    // Extract synchronously and return a 'static future; an `async fn` here would
    // capture the `parts` lifetime.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        // Absent only when a handler is mounted outside the gate.
        let user = parts.extensions.get::<AuthUser>().cloned();
        async move { user.ok_or(ApiError::Unauthorized) }
    }
}
