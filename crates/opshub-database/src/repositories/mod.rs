//! Store trait implementations backed by PostgreSQL.

pub mod account;
pub mod security_event;

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;

use opshub_core::error::{AppError, ErrorKind};
use opshub_core::result::AppResult;

/// Run a query future under the statement timeout.
///
/// An elapsed timeout maps to `ServiceUnavailable` so callers can retry;
/// it is never conflated with a security outcome.
pub(crate) async fn bounded<T, F>(limit: Duration, what: &str, fut: F) -> AppResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match timeout(limit, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(AppError::with_source(
            ErrorKind::Database,
            format!("{what} failed"),
            e,
        )),
        Err(_) => Err(AppError::service_unavailable(format!(
            "{what} timed out after {}s",
            limit.as_secs()
        ))),
    }
}
