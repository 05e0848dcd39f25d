use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use carstore_core::config::Config;

use crate::infra::bounded::Budgets;

/// Storage backend selected at startup. Env var: `STORAGE`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    #[default]
    Postgres,
    Memory,
}

/// Car store API configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Database name, logged at startup. Env var: `DB_NAME`.
    #[serde(default = "default_db_name")]
    pub db_name: String,
    /// HTTP listen port (default 3000). Env var: `PORT`.
    #[serde(default = "default_port")]
    pub port: u16,
    /// HS256 signing secret. Env var: `JWT_SECRET`.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Session token lifetime in seconds (default 24h). Env var: `TOKEN_TTL_SECS`.
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
    /// Front-end bundle served at the catch-all path. Env var: `STATIC_DIR`.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    #[serde(default)]
    pub storage: StorageKind,
    #[serde(default = "default_point_timeout_ms")]
    pub point_timeout_ms: u64,
    #[serde(default = "default_list_timeout_ms")]
    pub list_timeout_ms: u64,
    /// scrypt cost parameter. Env var: `SCRYPT_LOG_N`.
    #[serde(default = "default_scrypt_log_n")]
    pub scrypt_log_n: u8,
}

impl Config for ApiConfig {}

impl ApiConfig {
    pub fn budgets(&self) -> Budgets {
        Budgets {
            point: Duration::from_millis(self.point_timeout_ms),
            list: Duration::from_millis(self.list_timeout_ms),
        }
    }
}

fn default_database_url() -> String {
    "postgres://localhost:5432/car_store".to_owned()
}

fn default_db_name() -> String {
    "car_store".to_owned()
}

fn default_port() -> u16 {
    3000
}

fn default_jwt_secret() -> String {
    "your-secret-key".to_owned()
}

fn default_token_ttl_secs() -> u64 {
    24 * 60 * 60
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("./static")
}

fn default_point_timeout_ms() -> u64 {
    5_000
}

fn default_list_timeout_ms() -> u64 {
    10_000
}

fn default_scrypt_log_n() -> u8 {
    15
}
