//! Salted scrypt password hashing (PHC string format).

use std::sync::Arc;

use anyhow::Context as _;
use scrypt::{
    Params, Scrypt,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

const BLOCK_SIZE: u32 = 8;
const PARALLELISM: u32 = 1;
const KEY_LEN: usize = 32;

/// Hashes and verifies passwords. Work runs on the blocking pool so a slow hash
/// never stalls the async workers.
#[derive(Debug, Clone)]
pub struct PasswordService {
    params: Params,
    /// Hash of a throwaway secret under the same params, verified against when
    /// there is no stored hash so both paths cost one scrypt run.
    decoy: Arc<str>,
}

impl PasswordService {
    /// `log_n` is the scrypt CPU/memory cost (2^log_n iterations).
    pub fn new(log_n: u8) -> anyhow::Result<Self> {
        let params = Params::new(log_n, BLOCK_SIZE, PARALLELISM, KEY_LEN)
            .map_err(|e| anyhow::anyhow!("invalid scrypt params: {e}"))?;
        let decoy = hash_with(params, b"decoy-password")?;
        Ok(Self {
            params,
            decoy: decoy.into(),
        })
    }

    pub async fn hash(&self, plain: String) -> anyhow::Result<String> {
        let params = self.params;
        tokio::task::spawn_blocking(move || hash_with(params, plain.as_bytes()))
            .await
            .context("join password hashing task")?
    }

    /// `false` for a wrong password and for a stored hash that cannot be parsed.
    pub async fn verify(&self, plain: String, stored: String) -> anyhow::Result<bool> {
        tokio::task::spawn_blocking(move || {
            let Ok(parsed) = PasswordHash::new(&stored) else {
                tracing::warn!("stored password hash is not a valid PHC string");
                return false;
            };
            Scrypt.verify_password(plain.as_bytes(), &parsed).is_ok()
        })
        .await
        .context("join password verification task")
    }

    /// Burns one verification for an account that does not exist. Always `false`.
    pub async fn verify_absent(&self, plain: String) -> anyhow::Result<bool> {
        self.verify(plain, self.decoy.to_string()).await?;
        Ok(false)
    }
}

fn hash_with(params: Params, plain: &[u8]) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Scrypt
        .hash_password_customized(plain, None, None, params, &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow::anyhow!("hash password: {e}"))
}
