//! Lockout policy engine.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use opshub_core::config::auth::AuthConfig;
use opshub_core::result::AppResult;
use opshub_entity::account::model::Account;
use opshub_entity::account::store::AccountStore;
use opshub_entity::security_event::action::SecurityAction;

use crate::audit::SecurityAuditLog;
use crate::context::RequestContext;

/// Lock status of an account at the moment of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    /// No lock is in place.
    NotLocked,
    /// A lock existed but its window had elapsed; it was cleared along
    /// with the failed-attempt counter.
    Expired,
    /// The account is locked until the given time.
    Locked {
        /// When the lock elapses.
        until: DateTime<Utc>,
    },
}

/// Tracks failed attempts per account and applies lockout windows.
///
/// Locks expire lazily: there is no background sweeper, so every read path
/// must go through [`LockoutPolicy::check`] before trusting the locked
/// state, otherwise an elapsed lock would block login forever.
#[derive(Clone)]
pub struct LockoutPolicy {
    store: Arc<dyn AccountStore>,
    audit: Arc<SecurityAuditLog>,
    max_failed_attempts: i32,
    lockout_duration: Duration,
}

impl std::fmt::Debug for LockoutPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockoutPolicy")
            .field("max_failed_attempts", &self.max_failed_attempts)
            .field("lockout_duration", &self.lockout_duration)
            .finish()
    }
}

impl LockoutPolicy {
    /// Creates a policy engine from auth configuration.
    pub fn new(
        store: Arc<dyn AccountStore>,
        audit: Arc<SecurityAuditLog>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            store,
            audit,
            max_failed_attempts: config.max_failed_attempts,
            lockout_duration: Duration::minutes(config.lockout_duration_minutes as i64),
        }
    }

    /// Reports the account's lock status, clearing an elapsed lock.
    pub async fn check(&self, account: &Account) -> AppResult<LockState> {
        match account.locked_until {
            Some(until) if until > Utc::now() => Ok(LockState::Locked { until }),
            Some(_) => {
                self.store.clear_lockout(account.id).await?;
                Ok(LockState::Expired)
            }
            None => Ok(LockState::NotLocked),
        }
    }

    /// Registers a failed credential check.
    ///
    /// The increment is a plain read-modify-write in the store; concurrent
    /// attempts against the same account may occasionally lose an
    /// increment, which only weakens the lockout slightly.
    pub async fn record_failure(
        &self,
        account: &Account,
        ctx: &RequestContext,
    ) -> AppResult<LockState> {
        let attempts = self.store.increment_failed_attempts(account.id).await?;

        if attempts >= self.max_failed_attempts {
            let until = Utc::now() + self.lockout_duration;
            self.store.lock_until(account.id, until).await?;
            self.audit
                .record(
                    Some(account.id),
                    SecurityAction::AccountLocked,
                    false,
                    ctx,
                    json!({ "attempts": attempts, "locked_until": until }),
                )
                .await;
            Ok(LockState::Locked { until })
        } else {
            self.audit
                .record(
                    Some(account.id),
                    SecurityAction::FailedLogin,
                    false,
                    ctx,
                    json!({
                        "attempts": attempts,
                        "max_attempts": self.max_failed_attempts,
                    }),
                )
                .await;
            Ok(LockState::NotLocked)
        }
    }

    /// Clears the failed-attempt counter and any lock unconditionally.
    pub async fn reset(&self, account_id: Uuid) -> AppResult<()> {
        self.store.clear_lockout(account_id).await
    }
}
