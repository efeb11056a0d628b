//! Claims carried inside a session token.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload signed into every session token.
///
/// The `exp` claim carries the token's own declared window, so a token
/// issued without "remember me" expires at its short window even though
/// the verifier would accept a longer extended token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject — the account ID.
    pub sub: Uuid,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token ID, unique per issuance.
    pub jti: Uuid,
}
