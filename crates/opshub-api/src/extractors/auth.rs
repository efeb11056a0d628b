//! `AuthAccount` extractor — resolves the session cookie to a live account.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use opshub_core::error::AppError;
use opshub_entity::account::model::Account;

use crate::state::AppState;

/// Extracted authenticated account available in handlers.
///
/// Resolution order: session cookie, then `Authorization: Bearer`. The
/// token only proves identity at issuance time, so the account is
/// re-loaded and its status re-checked on every request.
#[derive(Debug, Clone)]
pub struct AuthAccount(pub Account);

impl std::ops::Deref for AuthAccount {
    type Target = Account;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthAccount {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let cookie_token = jar
            .get(&state.config.session.cookie_name)
            .map(|c| c.value().to_string());

        let bearer_token = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(String::from);

        let token = cookie_token
            .or(bearer_token)
            .ok_or_else(|| AppError::invalid_token("Not authenticated"))?;

        let account_id = state.auth.verify_session(&token)?;

        let account = state
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AppError::invalid_token("Invalid or expired session token"))?;

        if !account.status.can_login() {
            return Err(AppError::account_disabled(
                "Your account is inactive. Contact an administrator.",
            ));
        }

        Ok(AuthAccount(account))
    }
}
