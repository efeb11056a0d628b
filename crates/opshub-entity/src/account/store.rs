//! Account store boundary.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use opshub_core::result::AppResult;

use super::model::{Account, CreateAccount};

/// Persistence boundary for accounts.
///
/// The core requires point lookups by id/email/token and partial-field
/// updates. Concurrent increments of the failed-attempt counter are
/// last-write-wins; the occasional missed increment only weakens the
/// lockout slightly and is an accepted approximation.
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Find an account by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>>;

    /// Find an account by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Find an account by exact reset-token match.
    async fn find_by_reset_token(&self, token: &str) -> AppResult<Option<Account>>;

    /// Provision a new account.
    async fn create(&self, data: &CreateAccount) -> AppResult<Account>;

    /// Increment the failed-login counter and return the new value.
    async fn increment_failed_attempts(&self, id: Uuid) -> AppResult<i32>;

    /// Lock the account until the given time.
    async fn lock_until(&self, id: Uuid, until: DateTime<Utc>) -> AppResult<()>;

    /// Clear the failed-login counter and any lock.
    async fn clear_lockout(&self, id: Uuid) -> AppResult<()>;

    /// Store a reset token and its expiry, superseding any prior token.
    async fn set_reset_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Clear the reset token and its expiry.
    async fn clear_reset_token(&self, id: Uuid) -> AppResult<()>;

    /// Apply a successful password reset in one update: new hash, cleared
    /// reset token, stamped `password_changed_at`, cleared lockout state.
    async fn complete_password_reset(&self, id: Uuid, password_hash: &str) -> AppResult<Account>;

    /// Stamp `last_login_at` after a successful authentication.
    async fn record_login(&self, id: Uuid) -> AppResult<()>;
}
