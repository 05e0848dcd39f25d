//! `Authorization: Bearer <token>` header parsing.

use http::HeaderMap;
use http::header::AUTHORIZATION;

use crate::AuthError;

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The header must consist of exactly the scheme and one non-empty token.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::NotBearer)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::NotBearer),
    }
}
