//! Security event store boundary.

use async_trait::async_trait;

use opshub_core::result::AppResult;

use super::model::CreateSecurityEvent;

/// Append-only persistence boundary for security events.
#[async_trait]
pub trait SecurityEventStore: Send + Sync + 'static {
    /// Append a single event. Ordering beyond the store's natural
    /// insertion order is not guaranteed.
    async fn append(&self, event: &CreateSecurityEvent) -> AppResult<()>;
}
