//! # opshub-database
//!
//! PostgreSQL connection management and store trait implementations for
//! OpsHub. Every query is bounded by the configured statement timeout so
//! no core operation can block indefinitely on the remote store.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
