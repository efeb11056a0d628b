//! Security event action enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Authentication-relevant outcomes recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "security_action", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SecurityAction {
    /// Credentials verified and a session was issued.
    SuccessfulLogin,
    /// A login attempt was rejected.
    FailedLogin,
    /// An account was locked after too many failed attempts.
    AccountLocked,
    /// A password reset was requested.
    PasswordResetRequested,
    /// A password was changed through the reset flow.
    PasswordReset,
}

impl SecurityAction {
    /// Return the action as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuccessfulLogin => "successful_login",
            Self::FailedLogin => "failed_login",
            Self::AccountLocked => "account_locked",
            Self::PasswordResetRequested => "password_reset_requested",
            Self::PasswordReset => "password_reset",
        }
    }
}

impl fmt::Display for SecurityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
