//! Session token issuing and validation (HS256 JWT).

use std::time::{SystemTime, UNIX_EPOCH};

use carstore_domain::user::UserRole;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AuthError;

/// Identity carried by a validated session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
    pub username: String,
    pub role: UserRole,
    pub exp: u64,
}

/// JWT claims payload.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | user ID (UUID string) |
/// | `email` | custom | email at issue time |
/// | `username` | custom | username at issue time |
/// | `role` | custom | `"user"` or `"admin"` |
/// | `exp` | `exp` | expiration, seconds since epoch |
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub email: String,
    pub username: String,
    pub role: UserRole,
    pub exp: u64,
}

/// Sign a token for the given user that expires `ttl_secs` from now.
///
/// Returns the encoded token and its `exp` claim.
pub fn issue_token(
    user_id: Uuid,
    email: &str,
    username: &str,
    role: UserRole,
    secret: &str,
    ttl_secs: u64,
) -> Result<(String, u64), jsonwebtoken::errors::Error> {
    let exp = now_secs() + ttl_secs;
    let claims = JwtClaims {
        sub: user_id.to_string(),
        email: email.to_owned(),
        username: username.to_owned(),
        role,
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok((token, exp))
}

/// Decode and validate a JWT, returning raw claims.
///
/// Validation: HS256, exp checked with the default 60s leeway, `exp` and `sub` required.
fn decode_jwt(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate a session token, returning the identity it carries.
pub fn validate_token(token: &str, secret: &str) -> Result<Identity, AuthError> {
    let claims = decode_jwt(token, secret)?;
    let user_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;
    Ok(Identity {
        user_id,
        email: claims.email,
        username: claims.username,
        role: claims.role,
        exp: claims.exp,
    })
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
