//! Password reset token lifecycle.

pub mod manager;

pub use manager::{PasswordResetManager, ResetRequestOutcome};
