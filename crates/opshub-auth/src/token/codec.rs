//! Signed session token creation and validation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use opshub_core::config::auth::AuthConfig;
use opshub_core::config::session::SessionConfig;
use opshub_core::error::AppError;
use opshub_core::result::AppResult;

use super::claims::SessionClaims;

/// Issues and validates self-contained session tokens (HMAC-SHA256).
///
/// Tokens are stateless: there is no server-side session table and no
/// denylist, so revocation before expiry requires rotating the signing
/// secret. Verification failures are reported uniformly without
/// distinguishing bad signature from expiry.
#[derive(Clone)]
pub struct SessionTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_days: i64,
    remember_me_ttl_days: i64,
}

impl std::fmt::Debug for SessionTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenCodec")
            .field("ttl_days", &self.ttl_days)
            .field("remember_me_ttl_days", &self.remember_me_ttl_days)
            .finish()
    }
}

impl SessionTokenCodec {
    /// Creates a codec from auth and session configuration.
    pub fn new(auth: &AuthConfig, session: &SessionConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(auth.session_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(auth.session_secret.as_bytes()),
            validation,
            ttl_days: session.ttl_days as i64,
            remember_me_ttl_days: session.remember_me_ttl_days as i64,
        }
    }

    /// Issues a signed token for the given account.
    ///
    /// The validity window is baked into the token at issuance: the short
    /// default, or the extended window when `remember_me` is set.
    pub fn issue(&self, account_id: Uuid, remember_me: bool) -> AppResult<String> {
        self.issue_at(Utc::now(), account_id, remember_me)
    }

    /// Returns the validity window applied to a token.
    pub fn window(&self, remember_me: bool) -> Duration {
        if remember_me {
            Duration::days(self.remember_me_ttl_days)
        } else {
            Duration::days(self.ttl_days)
        }
    }

    fn issue_at(
        &self,
        now: DateTime<Utc>,
        account_id: Uuid,
        remember_me: bool,
    ) -> AppResult<String> {
        let claims = SessionClaims {
            sub: account_id,
            iat: now.timestamp(),
            exp: (now + self.window(remember_me)).timestamp(),
            jti: Uuid::new_v4(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))
    }

    /// Validates a token and returns the account ID it was issued for.
    ///
    /// Signature mismatch, tampering, and expiry all yield the same
    /// `InvalidToken` result; the cause is never revealed to the caller.
    pub fn verify(&self, token: &str) -> AppResult<Uuid> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(|_| AppError::invalid_token("Invalid or expired session token"))
    }
}
