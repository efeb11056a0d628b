//! Account store implementation.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use opshub_core::error::AppError;
use opshub_core::result::AppResult;
use opshub_entity::account::model::{Account, CreateAccount};
use opshub_entity::account::store::AccountStore;

use super::bounded;
use crate::connection::DatabasePool;

/// PostgreSQL-backed account store.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
    statement_timeout: Duration,
}

impl AccountRepository {
    /// Create a new account repository over the shared pool.
    pub fn new(db: &DatabasePool) -> Self {
        Self {
            pool: db.pool().clone(),
            statement_timeout: db.statement_timeout(),
        }
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        bounded(
            self.statement_timeout,
            "Find account by id",
            sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool),
        )
        .await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        bounded(
            self.statement_timeout,
            "Find account by email",
            sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE LOWER(email) = LOWER($1)")
                .bind(email)
                .fetch_optional(&self.pool),
        )
        .await
    }

    async fn find_by_reset_token(&self, token: &str) -> AppResult<Option<Account>> {
        bounded(
            self.statement_timeout,
            "Find account by reset token",
            sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE reset_token = $1")
                .bind(token)
                .fetch_optional(&self.pool),
        )
        .await
    }

    async fn create(&self, data: &CreateAccount) -> AppResult<Account> {
        let result = bounded(
            self.statement_timeout,
            "Create account",
            sqlx::query_as::<_, Account>(
                "INSERT INTO accounts (email, name, role, password_hash) \
                 VALUES ($1, $2, $3, $4) \
                 RETURNING *",
            )
            .bind(&data.email)
            .bind(&data.name)
            .bind(data.role)
            .bind(&data.password_hash)
            .fetch_one(&self.pool),
        )
        .await;

        result.map_err(|e| {
            if e.message.contains("accounts_email_key") {
                AppError::conflict(format!("Email '{}' already in use", data.email))
            } else {
                e
            }
        })
    }

    async fn increment_failed_attempts(&self, id: Uuid) -> AppResult<i32> {
        let row: (i32,) = bounded(
            self.statement_timeout,
            "Increment failed attempts",
            sqlx::query_as(
                "UPDATE accounts SET failed_login_attempts = failed_login_attempts + 1, \
                                     updated_at = NOW() \
                 WHERE id = $1 RETURNING failed_login_attempts",
            )
            .bind(id)
            .fetch_one(&self.pool),
        )
        .await?;

        Ok(row.0)
    }

    async fn lock_until(&self, id: Uuid, until: DateTime<Utc>) -> AppResult<()> {
        bounded(
            self.statement_timeout,
            "Lock account",
            sqlx::query("UPDATE accounts SET locked_until = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(until)
                .execute(&self.pool),
        )
        .await?;
        Ok(())
    }

    async fn clear_lockout(&self, id: Uuid) -> AppResult<()> {
        bounded(
            self.statement_timeout,
            "Clear lockout",
            sqlx::query(
                "UPDATE accounts SET failed_login_attempts = 0, locked_until = NULL, \
                                     updated_at = NOW() \
                 WHERE id = $1",
            )
            .bind(id)
            .execute(&self.pool),
        )
        .await?;
        Ok(())
    }

    async fn set_reset_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        bounded(
            self.statement_timeout,
            "Set reset token",
            sqlx::query(
                "UPDATE accounts SET reset_token = $2, reset_token_expires_at = $3, \
                                     updated_at = NOW() \
                 WHERE id = $1",
            )
            .bind(id)
            .bind(token)
            .bind(expires_at)
            .execute(&self.pool),
        )
        .await?;
        Ok(())
    }

    async fn clear_reset_token(&self, id: Uuid) -> AppResult<()> {
        bounded(
            self.statement_timeout,
            "Clear reset token",
            sqlx::query(
                "UPDATE accounts SET reset_token = NULL, reset_token_expires_at = NULL, \
                                     updated_at = NOW() \
                 WHERE id = $1",
            )
            .bind(id)
            .execute(&self.pool),
        )
        .await?;
        Ok(())
    }

    async fn complete_password_reset(&self, id: Uuid, password_hash: &str) -> AppResult<Account> {
        bounded(
            self.statement_timeout,
            "Complete password reset",
            sqlx::query_as::<_, Account>(
                "UPDATE accounts SET password_hash = $2, \
                                     reset_token = NULL, \
                                     reset_token_expires_at = NULL, \
                                     password_changed_at = NOW(), \
                                     failed_login_attempts = 0, \
                                     locked_until = NULL, \
                                     updated_at = NOW() \
                 WHERE id = $1 RETURNING *",
            )
            .bind(id)
            .bind(password_hash)
            .fetch_optional(&self.pool),
        )
        .await?
        .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))
    }

    async fn record_login(&self, id: Uuid) -> AppResult<()> {
        bounded(
            self.statement_timeout,
            "Record login",
            sqlx::query("UPDATE accounts SET last_login_at = NOW(), updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(&self.pool),
        )
        .await?;
        Ok(())
    }
}
