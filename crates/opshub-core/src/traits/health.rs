//! Reachability probe for backing services.

use async_trait::async_trait;

use crate::result::AppResult;

/// A backing service that can report whether it is reachable.
///
/// Implemented by the database layer; the health endpoint answers degraded
/// when a probe fails.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Errors when the service cannot be reached.
    async fn ping(&self) -> AppResult<()>;
}
