use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use carstore_core::config::Config;
use carstore_core::tracing::init_tracing;

use carstore_api::config::{ApiConfig, StorageKind};
use carstore_api::domain::repository::Store;
use carstore_api::infra::db::DbStore;
use carstore_api::infra::memory::MemoryStore;
use carstore_api::infra::password::PasswordService;
use carstore_api::router::build_router;
use carstore_api::state::AppState;
use carstore_api::usecase::auth::TokenKeys;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env().context("load configuration")?;
    init_tracing();

    match config.storage {
        StorageKind::Postgres => {
            info!(db_name = %config.db_name, "connecting to database");
            let db = Database::connect(&config.database_url)
                .await
                .context("connect to database")?;
            serve(config, DbStore { db }).await
        }
        StorageKind::Memory => {
            info!("using in-memory storage");
            serve(config, MemoryStore::new()).await
        }
    }
}

async fn serve<S: Store>(config: ApiConfig, store: S) -> anyhow::Result<()> {
    let state = AppState {
        store: store.clone(),
        budgets: config.budgets(),
        passwords: PasswordService::new(config.scrypt_log_n)?,
        keys: TokenKeys {
            secret: config.jwt_secret.clone(),
            ttl_secs: config.token_ttl_secs,
        },
        static_dir: config.static_dir.clone(),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;

    info!("car store API listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    store.close().await?;
    info!("storage connections released");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received ctrl-c, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
