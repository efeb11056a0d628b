//! Authentication service — the login and reset orchestrator.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use opshub_core::error::AppError;
use opshub_core::result::AppResult;
use opshub_entity::account::model::AccountProfile;
use opshub_entity::account::status::AccountStatus;
use opshub_entity::account::store::AccountStore;
use opshub_entity::security_event::action::SecurityAction;

use crate::audit::SecurityAuditLog;
use crate::context::RequestContext;
use crate::lockout::{LockState, LockoutPolicy};
use crate::password::PasswordHasher;
use crate::reset::{PasswordResetManager, ResetRequestOutcome};
use crate::token::SessionTokenCodec;

/// Result of a successful login.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LoginOutcome {
    /// Signed session token.
    pub session_token: String,
    /// The authenticated account's public profile.
    pub account: AccountProfile,
}

/// Security bookkeeping snapshot for one account.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SecurityStatus {
    /// Current failed-attempt count.
    pub failed_attempts: i32,
    /// Whether the account is locked right now.
    pub locked: bool,
    /// When the lock elapses, if locked.
    pub locked_until: Option<DateTime<Utc>>,
}

/// Orchestrates credential verification, lockout, session issuance,
/// password reset, and audit recording.
///
/// Holds no mutable state of its own; every operation is an independent
/// unit of work against the injected store.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn AccountStore>,
    hasher: Arc<PasswordHasher>,
    tokens: Arc<SessionTokenCodec>,
    lockout: Arc<LockoutPolicy>,
    reset: Arc<PasswordResetManager>,
    audit: Arc<SecurityAuditLog>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService").finish()
    }
}

impl AuthService {
    /// Creates the service with all collaborators injected.
    pub fn new(
        store: Arc<dyn AccountStore>,
        hasher: Arc<PasswordHasher>,
        tokens: Arc<SessionTokenCodec>,
        lockout: Arc<LockoutPolicy>,
        reset: Arc<PasswordResetManager>,
        audit: Arc<SecurityAuditLog>,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
            lockout,
            reset,
            audit,
        }
    }

    /// Performs the complete login flow:
    ///
    /// 1. Reject empty email or password outright.
    /// 2. Resolve the account by email; an unknown email is reported as
    ///    invalid credentials, never as "no such account".
    /// 3. Check the lockout state (lazy expiry applies). Lockout IS
    ///    revealed to the caller — a product choice, since the account's
    ///    existence is already implied by its own prior logins.
    /// 4. Verify the password; a mismatch feeds the lockout policy.
    /// 5. Gate on account status.
    /// 6. Reset lockout bookkeeping, issue a token, record the event.
    ///
    /// A store failure at any step surfaces as a database/unavailable
    /// error, never as a credential outcome.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        remember_me: bool,
        ctx: &RequestContext,
    ) -> AppResult<LoginOutcome> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::invalid_credentials("Invalid email or password"));
        }

        let Some(account) = self.store.find_by_email(email).await? else {
            self.audit
                .record(
                    None,
                    SecurityAction::FailedLogin,
                    false,
                    ctx,
                    json!({ "email": email, "reason": "unknown email" }),
                )
                .await;
            return Err(AppError::invalid_credentials("Invalid email or password"));
        };

        if let LockState::Locked { until } = self.lockout.check(&account).await? {
            let remaining = (until - Utc::now()).num_minutes().max(1);
            return Err(AppError::account_locked(format!(
                "Account locked. Try again in {remaining} minute(s)."
            )));
        }

        if !self.hasher.verify(password, &account.password_hash) {
            self.lockout.record_failure(&account, ctx).await?;
            return Err(AppError::invalid_credentials("Invalid email or password"));
        }

        if account.status != AccountStatus::Active {
            self.audit
                .record(
                    Some(account.id),
                    SecurityAction::FailedLogin,
                    false,
                    ctx,
                    json!({ "reason": "account disabled", "status": account.status }),
                )
                .await;
            return Err(AppError::account_disabled(
                "Your account is inactive. Contact an administrator.",
            ));
        }

        self.lockout.reset(account.id).await?;
        let session_token = self.tokens.issue(account.id, remember_me)?;

        // Login stats are best-effort; a failed stamp must not fail the login.
        if let Err(e) = self.store.record_login(account.id).await {
            warn!(account_id = %account.id, error = %e, "Failed to record login time");
        }

        self.audit
            .record(
                Some(account.id),
                SecurityAction::SuccessfulLogin,
                true,
                ctx,
                json!({ "remember_me": remember_me }),
            )
            .await;

        info!(account_id = %account.id, "Login successful");

        Ok(LoginOutcome {
            session_token,
            account: account.profile(),
        })
    }

    /// Validates a session token and returns the account ID it carries.
    ///
    /// Stateless: no store access, trivially parallel.
    pub fn verify_session(&self, token: &str) -> AppResult<Uuid> {
        self.tokens.verify(token)
    }

    /// Requests a password reset for `email`.
    ///
    /// The response is uniform whether or not an account exists and
    /// whether or not mail delivery worked; the internal outcome is
    /// logged for operators.
    pub async fn request_password_reset(
        &self,
        email: &str,
        base_url: &str,
        ctx: &RequestContext,
    ) -> AppResult<()> {
        match self.reset.request_reset(email, base_url, ctx).await? {
            ResetRequestOutcome::Sent => {
                info!("Password reset mail handed to transport");
            }
            ResetRequestOutcome::UnknownEmail | ResetRequestOutcome::MailFailed => {
                // Already logged at the point of detection; the caller
                // sees "accepted" either way.
            }
        }
        Ok(())
    }

    /// Consumes a reset token and sets a new password.
    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
        ctx: &RequestContext,
    ) -> AppResult<AccountProfile> {
        let account = self.reset.consume_reset(token, new_password, ctx).await?;
        info!(account_id = %account.id, "Password reset completed");
        Ok(account.profile())
    }

    /// Reports failed-attempt and lock bookkeeping for an account.
    ///
    /// Runs the lazy-expiry check, so an elapsed lock reads as unlocked
    /// with a zeroed counter.
    pub async fn security_status(&self, account_id: Uuid) -> AppResult<SecurityStatus> {
        let account = self
            .store
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Account {account_id} not found")))?;

        Ok(match self.lockout.check(&account).await? {
            LockState::Locked { until } => SecurityStatus {
                failed_attempts: account.failed_login_attempts,
                locked: true,
                locked_until: Some(until),
            },
            LockState::Expired => SecurityStatus {
                failed_attempts: 0,
                locked: false,
                locked_until: None,
            },
            LockState::NotLocked => SecurityStatus {
                failed_attempts: account.failed_login_attempts,
                locked: false,
                locked_until: None,
            },
        })
    }
}
