//! Auth handlers — login, logout, me, password reset.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use opshub_core::error::AppError;

use crate::dto::request::{LoginRequest, PasswordResetConfirm, PasswordResetRequest};
use crate::dto::response::{AccountResponse, ApiResponse, LoginResponse, MessageResponse};
use crate::extractors::{AuthAccount, client_context};
use crate::state::AppState;

/// POST /api/auth/login
///
/// On success the session token is set as an HttpOnly cookie whose
/// lifetime matches the token's own validity window.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>), AppError> {
    let ctx = client_context(&headers);

    let outcome = state
        .auth
        .login(&req.email, &req.password, req.remember_me, &ctx)
        .await?;

    let ttl_days = if req.remember_me {
        state.config.session.remember_me_ttl_days
    } else {
        state.config.session.ttl_days
    };

    let mut cookie = Cookie::new(
        state.config.session.cookie_name.clone(),
        outcome.session_token,
    );
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(state.config.session.cookie_secure);
    cookie.set_path("/");
    cookie.set_max_age(time::Duration::days(ttl_days as i64));

    Ok((
        jar.add(cookie),
        Json(ApiResponse::ok(LoginResponse {
            account: outcome.account.into(),
        })),
    ))
}

/// POST /api/auth/logout
///
/// Sessions are stateless, so logout is purely cookie removal; the token
/// itself stays valid until its expiry.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<MessageResponse>>) {
    let mut cookie = Cookie::from(state.config.session.cookie_name.clone());
    cookie.set_path("/");

    (
        jar.remove(cookie),
        Json(ApiResponse::ok(MessageResponse::new(
            "Logged out successfully",
        ))),
    )
}

/// GET /api/auth/me
pub async fn me(auth: AuthAccount) -> Json<ApiResponse<AccountResponse>> {
    Json(ApiResponse::ok(auth.profile().into()))
}

/// POST /api/auth/password-reset/request
///
/// Always answers 202 with the same message, whether or not the email
/// has an account behind it.
pub async fn request_password_reset(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<PasswordResetRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MessageResponse>>), AppError> {
    let ctx = client_context(&headers);

    state
        .auth
        .request_password_reset(&req.email, &state.config.server.base_url, &ctx)
        .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(ApiResponse::ok(MessageResponse::new(
            "If the email is registered, a reset link has been sent",
        ))),
    ))
}

/// POST /api/auth/password-reset/confirm
pub async fn confirm_password_reset(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<PasswordResetConfirm>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    let ctx = client_context(&headers);

    state
        .auth
        .reset_password(&req.token, &req.new_password, &ctx)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Password has been reset",
    ))))
}
