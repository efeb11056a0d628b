//! Security event entity and store boundary.

pub mod action;
pub mod model;
pub mod store;

pub use action::SecurityAction;
pub use model::{CreateSecurityEvent, SecurityEvent};
pub use store::SecurityEventStore;
