//! Session token configuration.

use serde::{Deserialize, Serialize};

/// Session token validity windows.
///
/// Tokens carry their own expiry: a token issued without "remember me"
/// expires after `ttl_days` even though the verifier would accept a
/// `remember_me_ttl_days` window on an extended token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Default session lifetime in days.
    #[serde(default = "default_ttl_days")]
    pub ttl_days: u64,
    /// Extended ("remember me") session lifetime in days.
    #[serde(default = "default_remember_me_ttl_days")]
    pub remember_me_ttl_days: u64,
    /// Name of the session cookie set by the HTTP layer.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Whether the session cookie is marked Secure.
    #[serde(default = "default_cookie_secure")]
    pub cookie_secure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_days: default_ttl_days(),
            remember_me_ttl_days: default_remember_me_ttl_days(),
            cookie_name: default_cookie_name(),
            cookie_secure: default_cookie_secure(),
        }
    }
}

fn default_ttl_days() -> u64 {
    7
}

fn default_remember_me_ttl_days() -> u64 {
    30
}

fn default_cookie_name() -> String {
    "session_id".to_string()
}

fn default_cookie_secure() -> bool {
    true
}
