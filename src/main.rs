//! OpsHub Server — staff authentication and account security backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use opshub_auth::{
    AuthService, LockoutPolicy, PasswordHasher, PasswordResetManager, SecurityAuditLog,
    SessionTokenCodec,
};
use opshub_core::config::AppConfig;
use opshub_core::error::AppError;
use opshub_core::traits::LogMailer;
use opshub_database::connection::DatabasePool;
use opshub_database::repositories::account::AccountRepository;
use opshub_database::repositories::security_event::SecurityEventRepository;

#[tokio::main]
async fn main() {
    let env = std::env::var("OPSHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting OpsHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let db = Arc::new(DatabasePool::connect(&config.database).await?);

    tracing::info!("Running database migrations...");
    opshub_database::migration::run_migrations(db.pool()).await?;
    tracing::info!("Database migrations complete");

    // ── Step 2: Repositories ─────────────────────────────────────
    let accounts = Arc::new(AccountRepository::new(&db));
    let events = Arc::new(SecurityEventRepository::new(&db));

    // ── Step 3: Auth system ──────────────────────────────────────
    tracing::info!("Initializing authentication system...");
    let audit = Arc::new(SecurityAuditLog::new(events));
    let hasher = Arc::new(PasswordHasher::new(&config.auth)?);
    let tokens = Arc::new(SessionTokenCodec::new(&config.auth, &config.session));
    let lockout = Arc::new(LockoutPolicy::new(
        accounts.clone(),
        audit.clone(),
        &config.auth,
    ));

    if config.mail.enabled {
        tracing::warn!("Mail is enabled but no transport is built in; messages will be logged");
    }
    let mailer = Arc::new(LogMailer::new(&config.mail));

    let reset = Arc::new(PasswordResetManager::new(
        accounts.clone(),
        hasher.clone(),
        mailer,
        audit.clone(),
        &config.auth,
    ));

    let auth = Arc::new(AuthService::new(
        accounts.clone(),
        hasher,
        tokens,
        lockout,
        reset,
        audit,
    ));

    // ── Step 4: Build and start HTTP server ──────────────────────
    let state = opshub_api::AppState::new(Arc::new(config.clone()), auth, accounts, db.clone());
    let app = opshub_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("OpsHub server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db.close().await;
    tracing::info!("OpsHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
