//! Auth types shared by the car store service and its tests.
//!
//! Provides session token issuing/validation and `Authorization: Bearer` parsing.

pub mod bearer;
pub mod token;

/// Errors returned while authenticating a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("missing authorization header")]
    MissingHeader,
    #[error("authorization header must use the Bearer scheme")]
    NotBearer,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}
