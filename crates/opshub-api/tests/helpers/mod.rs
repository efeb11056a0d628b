//! Shared test helpers: in-memory backed application and request utilities.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use opshub_api::state::AppState;
use opshub_auth::{
    AuthService, LockoutPolicy, PasswordHasher, PasswordResetManager, SecurityAuditLog,
    SessionTokenCodec,
};
use opshub_core::config::logging::LoggingConfig;
use opshub_core::config::mail::MailConfig;
use opshub_core::config::session::SessionConfig;
use opshub_core::config::{AppConfig, DatabaseConfig, ServerConfig};
use opshub_core::config::auth::AuthConfig;
use opshub_core::error::AppError;
use opshub_core::result::AppResult;
use opshub_core::traits::{HealthProbe, Mailer};
use opshub_entity::account::model::{Account, CreateAccount};
use opshub_entity::account::role::AccountRole;
use opshub_entity::account::status::AccountStatus;
use opshub_entity::account::store::AccountStore;
use opshub_entity::security_event::model::CreateSecurityEvent;
use opshub_entity::security_event::store::SecurityEventStore;

/// In-memory account store.
#[derive(Default)]
pub struct MemoryAccountStore {
    accounts: Mutex<HashMap<Uuid, Account>>,
}

impl MemoryAccountStore {
    pub fn get(&self, id: Uuid) -> Option<Account> {
        self.accounts.lock().unwrap().get(&id).cloned()
    }

    pub fn update<F: FnOnce(&mut Account)>(&self, id: Uuid, f: F) {
        let mut accounts = self.accounts.lock().unwrap();
        f(accounts.get_mut(&id).expect("account exists"));
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts
            .values()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_reset_token(&self, token: &str) -> AppResult<Option<Account>> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts
            .values()
            .find(|a| a.reset_token.as_deref() == Some(token))
            .cloned())
    }

    async fn create(&self, data: &CreateAccount) -> AppResult<Account> {
        let now = Utc::now();
        let account = Account {
            id: Uuid::new_v4(),
            email: data.email.clone(),
            name: data.name.clone(),
            role: data.role,
            status: AccountStatus::Active,
            password_hash: data.password_hash.clone(),
            failed_login_attempts: 0,
            locked_until: None,
            reset_token: None,
            reset_token_expires_at: None,
            password_changed_at: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        };
        self.accounts
            .lock()
            .unwrap()
            .insert(account.id, account.clone());
        Ok(account)
    }

    async fn increment_failed_attempts(&self, id: Uuid) -> AppResult<i32> {
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("No such account"))?;
        account.failed_login_attempts += 1;
        Ok(account.failed_login_attempts)
    }

    async fn lock_until(&self, id: Uuid, until: DateTime<Utc>) -> AppResult<()> {
        self.update(id, |a| a.locked_until = Some(until));
        Ok(())
    }

    async fn clear_lockout(&self, id: Uuid) -> AppResult<()> {
        self.update(id, |a| {
            a.failed_login_attempts = 0;
            a.locked_until = None;
        });
        Ok(())
    }

    async fn set_reset_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        self.update(id, |a| {
            a.reset_token = Some(token.to_string());
            a.reset_token_expires_at = Some(expires_at);
        });
        Ok(())
    }

    async fn clear_reset_token(&self, id: Uuid) -> AppResult<()> {
        self.update(id, |a| {
            a.reset_token = None;
            a.reset_token_expires_at = None;
        });
        Ok(())
    }

    async fn complete_password_reset(&self, id: Uuid, password_hash: &str) -> AppResult<Account> {
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("No such account"))?;
        account.password_hash = password_hash.to_string();
        account.reset_token = None;
        account.reset_token_expires_at = None;
        account.password_changed_at = Some(Utc::now());
        account.failed_login_attempts = 0;
        account.locked_until = None;
        Ok(account.clone())
    }

    async fn record_login(&self, id: Uuid) -> AppResult<()> {
        self.update(id, |a| a.last_login_at = Some(Utc::now()));
        Ok(())
    }
}

/// In-memory security event store.
#[derive(Default)]
pub struct MemoryEventStore {
    events: Mutex<Vec<CreateSecurityEvent>>,
}

impl MemoryEventStore {
    pub fn recorded(&self) -> Vec<CreateSecurityEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl SecurityEventStore for MemoryEventStore {
    async fn append(&self, event: &CreateSecurityEvent) -> AppResult<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// In-memory mailer recording each message body.
#[derive(Default)]
pub struct MemoryMailer {
    bodies: Mutex<Vec<String>>,
}

impl MemoryMailer {
    pub fn bodies(&self) -> Vec<String> {
        self.bodies.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, _to: &str, _subject: &str, body: &str, _is_html: bool) -> AppResult<()> {
        self.bodies.lock().unwrap().push(body.to_string());
        Ok(())
    }
}

/// Togglable database probe standing in for the real pool.
#[derive(Default)]
pub struct MemoryProbe {
    down: AtomicBool,
}

impl MemoryProbe {
    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }
}

#[async_trait]
impl HealthProbe for MemoryProbe {
    async fn ping(&self) -> AppResult<()> {
        if self.down.load(Ordering::SeqCst) {
            Err(AppError::service_unavailable("Database unreachable"))
        } else {
            Ok(())
        }
    }
}

/// Test application over in-memory stores.
pub struct TestApp {
    pub router: Router,
    pub accounts: Arc<MemoryAccountStore>,
    pub events: Arc<MemoryEventStore>,
    pub mailer: Arc<MemoryMailer>,
    pub probe: Arc<MemoryProbe>,
    pub hasher: Arc<PasswordHasher>,
    pub config: Arc<AppConfig>,
}

impl TestApp {
    pub fn new() -> Self {
        let config = Arc::new(test_config());

        let accounts = Arc::new(MemoryAccountStore::default());
        let events = Arc::new(MemoryEventStore::default());
        let mailer = Arc::new(MemoryMailer::default());
        let probe = Arc::new(MemoryProbe::default());

        let audit = Arc::new(SecurityAuditLog::new(events.clone()));
        let hasher =
            Arc::new(PasswordHasher::new(&config.auth).expect("valid test hasher parameters"));
        let tokens = Arc::new(SessionTokenCodec::new(&config.auth, &config.session));
        let lockout = Arc::new(LockoutPolicy::new(
            accounts.clone(),
            audit.clone(),
            &config.auth,
        ));
        let reset = Arc::new(PasswordResetManager::new(
            accounts.clone(),
            hasher.clone(),
            mailer.clone(),
            audit.clone(),
            &config.auth,
        ));

        let auth = Arc::new(AuthService::new(
            accounts.clone(),
            hasher.clone(),
            tokens,
            lockout,
            reset,
            audit,
        ));

        let state = AppState::new(config.clone(), auth, accounts.clone(), probe.clone());
        let router = opshub_api::router::build_router(state);

        Self {
            router,
            accounts,
            events,
            mailer,
            probe,
            hasher,
            config,
        }
    }

    /// Creates an active account and returns it.
    pub async fn create_account(&self, email: &str, password: &str, role: AccountRole) -> Account {
        let password_hash = self.hasher.hash(password).expect("hashing succeeds");
        self.accounts
            .create(&CreateAccount {
                email: email.to_string(),
                name: "Test Person".to_string(),
                role,
                password_hash,
            })
            .await
            .expect("account created")
    }

    /// Logs in and returns the session token from the Set-Cookie header.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );
        response
            .session_cookie
            .expect("No session cookie in login response")
    }

    /// Make an HTTP request to the test app.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        session: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = session {
            req = req.header(
                "Cookie",
                format!("{}={}", self.config.session.cookie_name, token),
            );
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();

        let session_cookie = response
            .headers()
            .get("set-cookie")
            .and_then(|v| v.to_str().ok())
            .and_then(|raw| {
                let (name_value, _) = raw.split_once(';').unwrap_or((raw, ""));
                let (name, value) = name_value.split_once('=')?;
                (name == self.config.session.cookie_name && !value.is_empty())
                    .then(|| value.to_string())
            });

        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            session_cookie,
        }
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
    /// Session token from a Set-Cookie header, if one was set
    pub session_cookie: Option<String>,
}

/// Configuration with minimal Argon2 cost so tests stay fast.
fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            base_url: "https://ops.example".to_string(),
        },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout_seconds: 1,
            idle_timeout_seconds: 60,
            statement_timeout_seconds: 5,
        },
        auth: AuthConfig {
            argon2_memory_kib: 8,
            argon2_iterations: 1,
            argon2_parallelism: 1,
            ..AuthConfig::default()
        },
        session: SessionConfig {
            cookie_secure: false,
            ..SessionConfig::default()
        },
        mail: MailConfig::default(),
        logging: LoggingConfig::default(),
    }
}
