//! # opshub-entity
//!
//! Domain entity models for OpsHub. Every struct in this crate represents
//! a database table row or a domain value object. All entities derive
//! `Debug`, `Clone`, `Serialize`, `Deserialize`, and database entities
//! additionally derive `sqlx::FromRow`.
//!
//! The store boundary traits ([`account::AccountStore`],
//! [`security_event::SecurityEventStore`]) also live here so that the auth
//! core can be exercised against in-memory doubles without a database.

pub mod account;
pub mod security_event;
