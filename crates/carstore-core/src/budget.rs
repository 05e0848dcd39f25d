use std::future::Future;
use std::time::Duration;

/// Run `fut` under a time budget. Expiry becomes an error naming `op`.
pub async fn within<F, T>(budget: Duration, op: &'static str, fut: F) -> anyhow::Result<T>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(budget, fut).await.map_err(|_| {
        ::tracing::warn!(op, budget_ms = budget.as_millis() as u64, "operation timed out");
        anyhow::anyhow!("{op} timed out after {}ms", budget.as_millis())
    })
}
