//! Application state shared across all handlers.

use std::sync::Arc;

use opshub_auth::AuthService;
use opshub_core::config::AppConfig;
use opshub_core::traits::HealthProbe;
use opshub_entity::account::store::AccountStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Authentication service
    pub auth: Arc<AuthService>,
    /// Account store for session resolution
    pub accounts: Arc<dyn AccountStore>,
    /// Database reachability probe for the health endpoint
    pub health: Arc<dyn HealthProbe>,
}

impl AppState {
    /// Creates the state from its shared dependencies.
    pub fn new(
        config: Arc<AppConfig>,
        auth: Arc<AuthService>,
        accounts: Arc<dyn AccountStore>,
        health: Arc<dyn HealthProbe>,
    ) -> Self {
        Self {
            config,
            auth,
            accounts,
            health,
        }
    }
}
