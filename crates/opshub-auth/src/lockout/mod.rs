//! Failed-attempt bookkeeping and lockout windows.

pub mod policy;

pub use policy::{LockState, LockoutPolicy};
