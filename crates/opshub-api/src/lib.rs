//! # opshub-api
//!
//! HTTP API layer for OpsHub built on Axum.
//!
//! Provides the authentication endpoints, cookie-based session handling,
//! DTOs, extractors, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
