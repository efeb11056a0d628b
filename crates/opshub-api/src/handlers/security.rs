//! Security status handlers (admin only).

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use opshub_core::error::AppError;

use crate::dto::response::{ApiResponse, SecurityStatusResponse};
use crate::extractors::AuthAccount;
use crate::state::AppState;

/// GET /api/accounts/{id}/security-status
pub async fn security_status(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(account_id): Path<Uuid>,
) -> Result<Json<ApiResponse<SecurityStatusResponse>>, AppError> {
    if !auth.role.is_admin() {
        return Err(AppError::authorization(
            "Administrator privileges required",
        ));
    }

    let status = state.auth.security_status(account_id).await?;

    Ok(Json(ApiResponse::ok(SecurityStatusResponse {
        failed_attempts: status.failed_attempts,
        locked: status.locked,
        locked_until: status.locked_until,
    })))
}
