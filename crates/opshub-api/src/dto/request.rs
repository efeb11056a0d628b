//! Request DTOs.

use serde::{Deserialize, Serialize};

/// Login request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Request an extended session window.
    #[serde(default)]
    pub remember_me: bool,
}

/// Password reset request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    /// Email to send the reset link to.
    pub email: String,
}

/// Password reset confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetConfirm {
    /// The reset token from the mailed link.
    pub token: String,
    /// The new password.
    pub new_password: String,
}
