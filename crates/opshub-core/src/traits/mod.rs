//! Boundary traits for external collaborators.
//!
//! Traits here are free of entity types so this crate stays dependency-free;
//! the store traits, which need the domain models, live in `opshub-entity`.

pub mod health;
pub mod mailer;

pub use health::HealthProbe;
pub use mailer::{LogMailer, Mailer};
