//! Signed bearer identities for integration tests.
//!
//! `TestIdentity` signs a real session token with the test secret, so requests
//! pass through the same auth gate as production traffic.

use carstore_auth_types::token::issue_token;
use carstore_domain::user::UserRole;
use http::HeaderValue;
use http::header::{AUTHORIZATION, HeaderMap};
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-integration";

/// Identity that tokens are issued for.
#[derive(Debug, Clone)]
pub struct TestIdentity {
    pub user_id: Uuid,
    pub email: String,
    pub username: String,
    pub role: UserRole,
}

impl TestIdentity {
    pub fn new(user_id: Uuid, username: &str) -> Self {
        Self {
            user_id,
            email: format!("{username}@example.com"),
            username: username.to_string(),
            role: UserRole::User,
        }
    }

    /// A fresh token valid for one hour, signed with [`TEST_JWT_SECRET`].
    pub fn token(&self) -> String {
        self.token_with(TEST_JWT_SECRET, 3600)
    }

    pub fn token_with(&self, secret: &str, ttl_secs: u64) -> String {
        issue_token(
            self.user_id,
            &self.email,
            &self.username,
            self.role,
            secret,
            ttl_secs,
        )
        .map(|(token, _)| token)
        .unwrap()
    }

    /// `Authorization: Bearer <token>` header map.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token())).unwrap(),
        );
        map
    }
}
