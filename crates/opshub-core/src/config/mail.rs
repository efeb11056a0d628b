//! Mail delivery configuration.

use serde::{Deserialize, Serialize};

/// Outgoing mail configuration.
///
/// Delivery itself happens behind the [`crate::traits::Mailer`] boundary;
/// this section only carries what every implementation needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Whether outgoing mail is enabled. When disabled, sends are logged
    /// and reported as delivered so callers behave identically.
    #[serde(default)]
    pub enabled: bool,
    /// Sender address for outgoing mail.
    #[serde(default = "default_sender")]
    pub sender: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            sender: default_sender(),
        }
    }
}

fn default_sender() -> String {
    "no-reply@opshub.local".to_string()
}
