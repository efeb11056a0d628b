//! Password reset token issuance and consumption.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use rand::RngCore;
use serde_json::json;
use tracing::warn;

use opshub_core::config::auth::AuthConfig;
use opshub_core::error::AppError;
use opshub_core::result::AppResult;
use opshub_core::traits::Mailer;
use opshub_entity::account::model::Account;
use opshub_entity::account::store::AccountStore;
use opshub_entity::security_event::action::SecurityAction;

use crate::audit::SecurityAuditLog;
use crate::context::RequestContext;
use crate::password::PasswordHasher;

/// How a reset request was handled internally.
///
/// The public API collapses all variants to "accepted" so callers cannot
/// probe which emails have accounts; the distinction exists for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetRequestOutcome {
    /// A token was issued and the mail handed to the transport.
    Sent,
    /// No account matched the email; nothing was issued.
    UnknownEmail,
    /// A token was issued but mail delivery failed.
    MailFailed,
}

/// Issues, validates, and invalidates single-use reset tokens.
#[derive(Clone)]
pub struct PasswordResetManager {
    store: Arc<dyn AccountStore>,
    hasher: Arc<PasswordHasher>,
    mailer: Arc<dyn Mailer>,
    audit: Arc<SecurityAuditLog>,
    token_ttl: Duration,
    password_min_length: usize,
}

impl std::fmt::Debug for PasswordResetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordResetManager")
            .field("token_ttl", &self.token_ttl)
            .field("password_min_length", &self.password_min_length)
            .finish()
    }
}

impl PasswordResetManager {
    /// Creates a reset manager from auth configuration.
    pub fn new(
        store: Arc<dyn AccountStore>,
        hasher: Arc<PasswordHasher>,
        mailer: Arc<dyn Mailer>,
        audit: Arc<SecurityAuditLog>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            store,
            hasher,
            mailer,
            audit,
            token_ttl: Duration::minutes(config.reset_token_ttl_minutes as i64),
            password_min_length: config.password_min_length,
        }
    }

    /// Issues a reset token for the account behind `email` and mails a
    /// reset link built against `base_url`.
    ///
    /// A new token supersedes any outstanding one. An unknown email and a
    /// failed mail send are distinguishable only in the returned outcome;
    /// neither is an error.
    pub async fn request_reset(
        &self,
        email: &str,
        base_url: &str,
        ctx: &RequestContext,
    ) -> AppResult<ResetRequestOutcome> {
        let Some(account) = self.store.find_by_email(email).await? else {
            warn!(email = %email, "Password reset requested for unknown email");
            return Ok(ResetRequestOutcome::UnknownEmail);
        };

        let token = generate_reset_token();
        let expires_at = Utc::now() + self.token_ttl;
        self.store
            .set_reset_token(account.id, &token, expires_at)
            .await?;

        self.audit
            .record(
                Some(account.id),
                SecurityAction::PasswordResetRequested,
                true,
                ctx,
                json!({ "expires_at": expires_at }),
            )
            .await;

        let reset_link = format!("{base_url}/reset-password?token={token}");
        let body = reset_mail_body(&account.name, &reset_link, self.token_ttl);

        match self
            .mailer
            .send(&account.email, "Password Reset Request", &body, true)
            .await
        {
            Ok(()) => Ok(ResetRequestOutcome::Sent),
            Err(e) => {
                warn!(
                    account_id = %account.id,
                    error = %e,
                    "Failed to deliver password reset mail"
                );
                Ok(ResetRequestOutcome::MailFailed)
            }
        }
    }

    /// Consumes a reset token and sets a new password.
    ///
    /// An expired token is cleared on first detection so a stale value
    /// cannot be replayed later. Success clears the token, stamps
    /// `password_changed_at`, and clears lockout state.
    pub async fn consume_reset(
        &self,
        token: &str,
        new_password: &str,
        ctx: &RequestContext,
    ) -> AppResult<Account> {
        if token.is_empty() {
            return Err(AppError::invalid_token("Invalid or expired reset token"));
        }
        if new_password.len() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }

        let Some(account) = self.store.find_by_reset_token(token).await? else {
            warn!("Password reset attempted with unknown token");
            return Err(AppError::invalid_token("Invalid or expired reset token"));
        };

        let still_valid = account
            .reset_token_expires_at
            .is_some_and(|expires_at| Utc::now() <= expires_at);
        if !still_valid {
            self.store.clear_reset_token(account.id).await?;
            warn!(account_id = %account.id, "Expired password reset token cleared");
            return Err(AppError::invalid_token("Invalid or expired reset token"));
        }

        let password_hash = self.hasher.hash(new_password)?;
        let updated = self
            .store
            .complete_password_reset(account.id, &password_hash)
            .await?;

        self.audit
            .record(
                Some(account.id),
                SecurityAction::PasswordReset,
                true,
                ctx,
                json!({}),
            )
            .await;

        Ok(updated)
    }
}

/// Generates a 256-bit random token in url-safe base64.
fn generate_reset_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Builds the HTML body for a reset mail.
fn reset_mail_body(name: &str, reset_link: &str, ttl: Duration) -> String {
    let hours = ttl.num_hours().max(1);
    format!(
        "<html>\n<body>\n\
         <p>Hello {name},</p>\n\
         <p>You have requested a password reset for your account.</p>\n\
         <p>Please click on the link below to reset your password:</p>\n\
         <p><a href=\"{reset_link}\">{reset_link}</a></p>\n\
         <p>This link will expire in {hours} hour(s).</p>\n\
         <p>If you did not request a password reset, please ignore this email.</p>\n\
         </body>\n</html>"
    )
}
