//! Mail delivery boundary.

use async_trait::async_trait;
use tracing::info;

use crate::config::mail::MailConfig;
use crate::result::AppResult;

/// Outbound mail delivery capability.
///
/// Failure is surfaced as an error to the caller, which decides whether it
/// is fatal; the password-reset path logs it and carries on.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Send a single message to `to`.
    async fn send(&self, to: &str, subject: &str, body: &str, is_html: bool) -> AppResult<()>;
}

/// Mailer used when no delivery transport is configured.
///
/// Logs the message metadata at info level and reports success, so the
/// surrounding flows behave exactly as with a real transport.
#[derive(Debug, Clone)]
pub struct LogMailer {
    sender: String,
}

impl LogMailer {
    /// Creates a log-only mailer from mail configuration.
    pub fn new(config: &MailConfig) -> Self {
        Self {
            sender: config.sender.clone(),
        }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, _body: &str, is_html: bool) -> AppResult<()> {
        info!(
            from = %self.sender,
            to = %to,
            subject = %subject,
            is_html,
            "Mail transport not configured, logging message instead of sending"
        );
        Ok(())
    }
}
