use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use teller_accounts::{Account, NewAccount};
use teller_core::AccountId;

use super::r#trait::{AccountStore, StoreError};

/// In-memory account store for tests/dev.
///
/// Identifiers start at 1 and are never reused, even after a delete.
#[derive(Debug)]
pub struct InMemoryAccountStore {
    inner: RwLock<State>,
}

#[derive(Debug)]
struct State {
    last_id: i64,
    accounts: BTreeMap<AccountId, Account>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(State {
                last_id: 0,
                accounts: BTreeMap::new(),
            }),
        }
    }
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> StoreError {
    StoreError::Persistence("in-memory account store lock poisoned".to_string())
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn init(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn create_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        let mut state = self.inner.write().map_err(|_| poisoned())?;
        state.last_id += 1;
        let account = account.into_account(AccountId::from_i64(state.last_id));
        state.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn get_accounts(&self) -> Result<Vec<Account>, StoreError> {
        let state = self.inner.read().map_err(|_| poisoned())?;
        Ok(state.accounts.values().cloned().collect())
    }

    async fn get_account_by_id(&self, id: AccountId) -> Result<Account, StoreError> {
        let state = self.inner.read().map_err(|_| poisoned())?;
        state
            .accounts
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn delete_account(&self, id: AccountId) -> Result<(), StoreError> {
        let mut state = self.inner.write().map_err(|_| poisoned())?;
        state
            .accounts
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
