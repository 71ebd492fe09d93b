use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use teller_accounts::{Account, NewAccount};
use teller_core::AccountId;

/// Storage failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No account has the requested identifier.
    #[error("account {0} not found")]
    NotFound(AccountId),

    /// The backing engine failed (connectivity, rejected write, unreadable row).
    #[error("{0}")]
    Persistence(String),
}

/// Durable CRUD over accounts.
///
/// Implementations must be safe to share across concurrently running requests;
/// any serialization happens inside the backing engine.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Ensure the backing schema exists. Safe to call repeatedly.
    async fn init(&self) -> Result<(), StoreError>;

    /// Insert `account`, returning it with its assigned identifier.
    async fn create_account(&self, account: NewAccount) -> Result<Account, StoreError>;

    /// All accounts in ascending identifier order (empty when none exist).
    async fn get_accounts(&self) -> Result<Vec<Account>, StoreError>;

    async fn get_account_by_id(&self, id: AccountId) -> Result<Account, StoreError>;

    /// Permanently remove the account. Fails with `NotFound` if nothing was deleted.
    async fn delete_account(&self, id: AccountId) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> AccountStore for Arc<S>
where
    S: AccountStore + ?Sized,
{
    async fn init(&self) -> Result<(), StoreError> {
        (**self).init().await
    }

    async fn create_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        (**self).create_account(account).await
    }

    async fn get_accounts(&self) -> Result<Vec<Account>, StoreError> {
        (**self).get_accounts().await
    }

    async fn get_account_by_id(&self, id: AccountId) -> Result<Account, StoreError> {
        (**self).get_account_by_id(id).await
    }

    async fn delete_account(&self, id: AccountId) -> Result<(), StoreError> {
        (**self).delete_account(id).await
    }
}
