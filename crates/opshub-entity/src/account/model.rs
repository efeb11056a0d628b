//! Account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::AccountRole;
use super::status::AccountStatus;

/// A staff account in the OpsHub system.
///
/// `reset_token` and `reset_token_expires_at` are set and cleared together;
/// at most one reset token is active per account at any time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    /// Unique account identifier.
    pub id: Uuid,
    /// Email address, unique and matched case-insensitively.
    pub email: String,
    /// Human-readable display name.
    pub name: String,
    /// Account role.
    pub role: AccountRole,
    /// Account status.
    pub status: AccountStatus,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Number of consecutive failed login attempts.
    pub failed_login_attempts: i32,
    /// Account locked until this time (if locked).
    pub locked_until: Option<DateTime<Utc>>,
    /// Outstanding password reset token (if any).
    #[serde(skip_serializing)]
    pub reset_token: Option<String>,
    /// Expiry of the outstanding reset token.
    pub reset_token_expires_at: Option<DateTime<Utc>>,
    /// When the password was last changed.
    pub password_changed_at: Option<DateTime<Utc>>,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Public projection of this account, never carrying the password hash.
    pub fn profile(&self) -> AccountProfile {
        AccountProfile {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
            status: self.status,
        }
    }
}

/// The account fields exposed to callers after authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfile {
    /// Unique account identifier.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Account role.
    pub role: AccountRole,
    /// Account status.
    pub status: AccountStatus,
}

/// Data required to provision a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccount {
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Assigned role.
    pub role: AccountRole,
    /// Pre-hashed password.
    pub password_hash: String,
}
