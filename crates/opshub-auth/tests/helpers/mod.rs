//! Shared test helpers: in-memory store doubles and a wired service.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use opshub_auth::{
    AuthService, LockoutPolicy, PasswordHasher, PasswordResetManager, RequestContext,
    SecurityAuditLog, SessionTokenCodec,
};
use opshub_core::config::auth::AuthConfig;
use opshub_core::config::session::SessionConfig;
use opshub_core::error::AppError;
use opshub_core::result::AppResult;
use opshub_core::traits::Mailer;
use opshub_entity::account::model::{Account, CreateAccount};
use opshub_entity::account::role::AccountRole;
use opshub_entity::account::status::AccountStatus;
use opshub_entity::account::store::AccountStore;
use opshub_entity::security_event::action::SecurityAction;
use opshub_entity::security_event::model::CreateSecurityEvent;
use opshub_entity::security_event::store::SecurityEventStore;

/// In-memory account store.
///
/// Setting `fail_lookups` makes every lookup return a database error, for
/// asserting how store faults surface through the service.
#[derive(Default)]
pub struct MemoryAccountStore {
    accounts: Mutex<HashMap<Uuid, Account>>,
    pub fail_lookups: AtomicBool,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, account: Account) {
        self.accounts.lock().unwrap().insert(account.id, account);
    }

    pub fn get(&self, id: Uuid) -> Option<Account> {
        self.accounts.lock().unwrap().get(&id).cloned()
    }

    /// Directly mutates a stored account, for arranging test preconditions.
    pub fn update<F: FnOnce(&mut Account)>(&self, id: Uuid, f: F) {
        let mut accounts = self.accounts.lock().unwrap();
        f(accounts.get_mut(&id).expect("account exists"));
    }

    fn check_failure(&self) -> AppResult<()> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            Err(AppError::database("Simulated store failure"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        self.check_failure()?;
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        self.check_failure()?;
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts
            .values()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_reset_token(&self, token: &str) -> AppResult<Option<Account>> {
        self.check_failure()?;
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
        self.insert(account.clone());
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
        account.updated_at = Utc::now();
        Ok(account.clone())
    }

    async fn record_login(&self, id: Uuid) -> AppResult<()> {
        self.update(id, |a| a.last_login_at = Some(Utc::now()));
        Ok(())
    }
}

/// In-memory security event store that records every appended event.
#[derive(Default)]
pub struct MemoryEventStore {
    events: Mutex<Vec<CreateSecurityEvent>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Vec<CreateSecurityEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count_of(&self, action: SecurityAction) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.action == action)
            .count()
    }
}

#[async_trait]
impl SecurityEventStore for MemoryEventStore {
    async fn append(&self, event: &CreateSecurityEvent) -> AppResult<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// A message captured by the in-memory mailer.
#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// In-memory mailer that records messages instead of sending them.
#[derive(Default)]
pub struct MemoryMailer {
    sent: Mutex<Vec<SentMail>>,
    pub fail_sends: AtomicBool,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, to: &str, subject: &str, body: &str, _is_html: bool) -> AppResult<()> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(AppError::mail("Simulated delivery failure"));
        }
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

/// A fully wired `AuthService` over in-memory doubles.
pub struct TestAuth {
    pub service: AuthService,
    pub accounts: Arc<MemoryAccountStore>,
    pub events: Arc<MemoryEventStore>,
    pub mailer: Arc<MemoryMailer>,
    pub hasher: Arc<PasswordHasher>,
    pub config: AuthConfig,
}

impl TestAuth {
    pub fn new() -> Self {
        Self::with_config(test_auth_config())
    }

    pub fn with_config(config: AuthConfig) -> Self {
        let accounts = Arc::new(MemoryAccountStore::new());
        let events = Arc::new(MemoryEventStore::new());
        let mailer = Arc::new(MemoryMailer::new());

        let audit = Arc::new(SecurityAuditLog::new(events.clone()));
        let hasher =
            Arc::new(PasswordHasher::new(&config).expect("valid test hasher parameters"));
        let tokens = Arc::new(SessionTokenCodec::new(&config, &SessionConfig::default()));
        let lockout = Arc::new(LockoutPolicy::new(accounts.clone(), audit.clone(), &config));
        let reset = Arc::new(PasswordResetManager::new(
            accounts.clone(),
            hasher.clone(),
            mailer.clone(),
            audit.clone(),
            &config,
        ));

        let service = AuthService::new(
            accounts.clone(),
            hasher.clone(),
            tokens,
            lockout,
            reset,
            audit,
        );

        Self {
            service,
            accounts,
            events,
            mailer,
            hasher,
            config,
        }
    }

    /// Creates an active account with the given credentials.
    pub async fn create_account(&self, email: &str, password: &str) -> Account {
        let password_hash = self.hasher.hash(password).expect("hashing succeeds");
        self.accounts
            .create(&CreateAccount {
                email: email.to_string(),
                name: "Test Person".to_string(),
                role: AccountRole::Employee,
                password_hash,
            })
            .await
            .expect("account created")
    }
}

/// Auth configuration with minimal Argon2 cost so tests stay fast.
pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        argon2_memory_kib: 8,
        argon2_iterations: 1,
        argon2_parallelism: 1,
        ..AuthConfig::default()
    }
}

/// An empty request context.
pub fn ctx() -> RequestContext {
    RequestContext::new(Some("203.0.113.9".to_string()), Some("test-agent".to_string()))
}
