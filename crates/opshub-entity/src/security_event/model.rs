//! Security event entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::action::SecurityAction;

/// An immutable audit record of an authentication-relevant outcome.
///
/// Events are append-only and never read back by the core.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SecurityEvent {
    /// Unique event identifier.
    pub id: Uuid,
    /// The account involved, if one could be resolved.
    pub account_id: Option<Uuid>,
    /// What happened.
    pub action: SecurityAction,
    /// Whether the attempt succeeded.
    pub success: bool,
    /// Client IP address, if known.
    pub ip_address: Option<String>,
    /// Client User-Agent, if known.
    pub user_agent: Option<String>,
    /// Free-form structured payload.
    pub details: serde_json::Value,
    /// When the event occurred.
    pub created_at: DateTime<Utc>,
}

/// Data required to append a new security event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSecurityEvent {
    /// The account involved, if one could be resolved.
    pub account_id: Option<Uuid>,
    /// What happened.
    pub action: SecurityAction,
    /// Whether the attempt succeeded.
    pub success: bool,
    /// Client IP address, if known.
    pub ip_address: Option<String>,
    /// Client User-Agent, if known.
    pub user_agent: Option<String>,
    /// Free-form structured payload.
    pub details: serde_json::Value,
}
