//! Request extractors.

pub mod auth;
pub mod client;

pub use auth::AuthAccount;
pub use client::{client_context, client_ip, client_user_agent};
