//! Postgres-backed account store.
//!
//! ## Error Mapping
//!
//! Every SQLx error becomes `StoreError::Persistence`, tagged with the failing
//! operation and (for database errors) the SQLSTATE code. A missing row is not
//! an SQLx error here: lookups use `fetch_optional` and deletes check the
//! affected-row count, both of which surface as `StoreError::NotFound`.
//!
//! ## Thread Safety
//!
//! `PostgresAccountStore` is `Send + Sync` and can be shared across request tasks.
//! Concurrency control is left to PostgreSQL.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{FromRow, PgPool, Row};
use tracing::{field, instrument, Span};

use teller_accounts::{Account, NewAccount};
use teller_core::{AccountId, AccountNumber};

use super::r#trait::{AccountStore, StoreError};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS account (
        id          BIGSERIAL PRIMARY KEY,
        first_name  VARCHAR(50) NOT NULL,
        last_name   VARCHAR(50) NOT NULL,
        number      BIGINT NOT NULL,
        balance     BIGINT NOT NULL DEFAULT 0,
        created_at  TIMESTAMPTZ NOT NULL
    )
"#;

/// Postgres-backed account store.
///
/// The pool is handed in by the caller and owned by the store from then on.
#[derive(Debug, Clone)]
pub struct PostgresAccountStore {
    pool: Arc<PgPool>,
}

impl PostgresAccountStore {
    /// Create a new PostgresAccountStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Open a pool against `database_url` and wrap it.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl AccountStore for PostgresAccountStore {
    #[instrument(skip(self), err)]
    async fn init(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("init", e))?;
        Ok(())
    }

    #[instrument(skip(self, account), fields(number = %account.number(), account_id = field::Empty), err)]
    async fn create_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO account (
                first_name,
                last_name,
                number,
                balance,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(account.first_name())
        .bind(account.last_name())
        .bind(account.number().as_i64())
        .bind(account.balance())
        .bind(account.created_at())
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_account", e))?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| map_sqlx_error("create_account", e))?;

        Span::current().record("account_id", id);
        Ok(account.into_account(AccountId::from_i64(id)))
    }

    #[instrument(skip(self), fields(account_count = field::Empty), err)]
    async fn get_accounts(&self) -> Result<Vec<Account>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, first_name, last_name, number, balance, created_at
            FROM account
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_accounts", e))?;

        let mut accounts = Vec::with_capacity(rows.len());
        for row in rows {
            let account = AccountRow::from_row(&row)
                .map_err(|e| map_sqlx_error("get_accounts", e))?;
            accounts.push(account.into());
        }

        Span::current().record("account_count", accounts.len());
        Ok(accounts)
    }

    #[instrument(skip(self), fields(account_id = %id), err)]
    async fn get_account_by_id(&self, id: AccountId) -> Result<Account, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, number, balance, created_at
            FROM account
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_account_by_id", e))?
        .ok_or(StoreError::NotFound(id))?;

        let account = AccountRow::from_row(&row)
            .map_err(|e| map_sqlx_error("get_account_by_id", e))?;
        Ok(account.into())
    }

    #[instrument(skip(self), fields(account_id = %id), err)]
    async fn delete_account(&self, id: AccountId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM account WHERE id = $1")
            .bind(id.as_i64())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_account", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

/// Map SQLx errors to StoreError.
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => match db_err.code() {
            Some(code) => StoreError::Persistence(format!(
                "database error in {operation} ({code}): {}",
                db_err.message()
            )),
            None => StoreError::Persistence(format!(
                "database error in {operation}: {}",
                db_err.message()
            )),
        },
        sqlx::Error::PoolClosed => {
            StoreError::Persistence(format!("connection pool closed in {operation}"))
        }
        sqlx::Error::PoolTimedOut => {
            StoreError::Persistence(format!("timed out acquiring connection in {operation}"))
        }
        _ => StoreError::Persistence(format!("sqlx error in {operation}: {err}")),
    }
}

// SQLx row types

#[derive(Debug)]
struct AccountRow {
    id: i64,
    first_name: String,
    last_name: String,
    number: i64,
    balance: i64,
    created_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for AccountRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(AccountRow {
            id: row.try_get("id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            number: row.try_get("number")?,
            balance: row.try_get("balance")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            id: AccountId::from_i64(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            number: AccountNumber::from_i64(row.number),
            balance: row.balance,
            created_at: row.created_at,
        }
    }
}
