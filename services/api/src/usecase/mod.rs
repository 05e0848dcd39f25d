pub mod auth;
pub mod car;
pub mod favorite;
pub mod review;

use chrono::{DateTime, SubsecRound, Utc};

/// Current time at microsecond precision, so a value handed back to the client
/// equals what PostgreSQL stores.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
