//! # opshub-auth
//!
//! The authentication and session-security core of OpsHub.
//!
//! ## Modules
//!
//! - `password` — Argon2id password hashing and verification
//! - `token` — signed, self-contained session token issuance and validation
//! - `lockout` — failed-attempt bookkeeping and lockout windows
//! - `reset` — single-use, time-limited password reset tokens
//! - `audit` — fire-and-forget security event recording
//! - `service` — the authentication orchestrator tying the above together
//!
//! Every component takes its collaborators through constructors; nothing in
//! this crate owns global state, background tasks, or a revocation list.

pub mod audit;
pub mod context;
pub mod lockout;
pub mod password;
pub mod reset;
pub mod service;
pub mod token;

pub use audit::SecurityAuditLog;
pub use context::RequestContext;
pub use lockout::{LockState, LockoutPolicy};
pub use password::PasswordHasher;
pub use reset::{PasswordResetManager, ResetRequestOutcome};
pub use service::{AuthService, LoginOutcome, SecurityStatus};
pub use token::SessionTokenCodec;
