//! Security event store implementation.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use opshub_core::result::AppResult;
use opshub_entity::security_event::model::CreateSecurityEvent;
use opshub_entity::security_event::store::SecurityEventStore;

use super::bounded;
use crate::connection::DatabasePool;

/// PostgreSQL-backed security event store.
#[derive(Debug, Clone)]
pub struct SecurityEventRepository {
    pool: PgPool,
    statement_timeout: Duration,
}

impl SecurityEventRepository {
    /// Create a new security event repository over the shared pool.
    pub fn new(db: &DatabasePool) -> Self {
        Self {
            pool: db.pool().clone(),
            statement_timeout: db.statement_timeout(),
        }
    }
}

#[async_trait]
impl SecurityEventStore for SecurityEventRepository {
    async fn append(&self, event: &CreateSecurityEvent) -> AppResult<()> {
        bounded(
            self.statement_timeout,
            "Append security event",
            sqlx::query(
                "INSERT INTO security_events \
                     (account_id, action, success, ip_address, user_agent, details) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(event.account_id)
            .bind(event.action)
            .bind(event.success)
            .bind(&event.ip_address)
            .bind(&event.user_agent)
            .bind(&event.details)
            .execute(&self.pool),
        )
        .await?;
        Ok(())
    }
}
