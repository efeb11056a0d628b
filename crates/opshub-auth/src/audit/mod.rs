//! Fire-and-forget security event recording.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use opshub_entity::security_event::action::SecurityAction;
use opshub_entity::security_event::model::CreateSecurityEvent;
use opshub_entity::security_event::store::SecurityEventStore;

use crate::context::RequestContext;

/// Appends structured audit records for authentication outcomes.
///
/// Recording never fails the originating operation: a store error is
/// reported to process diagnostics and swallowed.
#[derive(Clone)]
pub struct SecurityAuditLog {
    store: Arc<dyn SecurityEventStore>,
}

impl std::fmt::Debug for SecurityAuditLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityAuditLog").finish()
    }
}

impl SecurityAuditLog {
    /// Creates an audit log over the given event store.
    pub fn new(store: Arc<dyn SecurityEventStore>) -> Self {
        Self { store }
    }

    /// Records one security event.
    ///
    /// `account_id` is `None` when no account could be resolved, e.g. a
    /// login attempt against an unknown email.
    pub async fn record(
        &self,
        account_id: Option<Uuid>,
        action: SecurityAction,
        success: bool,
        ctx: &RequestContext,
        details: serde_json::Value,
    ) {
        let event = CreateSecurityEvent {
            account_id,
            action,
            success,
            ip_address: ctx.ip_address.clone(),
            user_agent: ctx.user_agent.clone(),
            details,
        };

        if let Err(e) = self.store.append(&event).await {
            warn!(
                action = %action,
                account_id = ?account_id,
                error = %e,
                "Failed to append security event"
            );
        }
    }
}
