use std::sync::Arc;

use teller_infra::account_store::{
    AccountStore, InMemoryAccountStore, PostgresAccountStore, StoreError,
};
use teller_infra::config::StorageConfig;

/// Everything a handler may touch. Built once at startup, shared read-only.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn AccountStore>,
}

impl AppServices {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn AccountStore {
        self.store.as_ref()
    }
}

/// Connect the configured account store and make sure its schema exists.
pub async fn build_services(storage: &StorageConfig) -> Result<AppServices, StoreError> {
    let store: Arc<dyn AccountStore> = match storage {
        StorageConfig::InMemory => {
            tracing::warn!("USE_PERSISTENT_STORES not set; accounts are kept in memory only");
            Arc::new(InMemoryAccountStore::new())
        }
        StorageConfig::Postgres {
            database_url,
            max_connections,
        } => {
            tracing::info!(max_connections, "connecting to postgres account store");
            Arc::new(PostgresAccountStore::connect(database_url, *max_connections).await?)
        }
    };

    store.init().await?;
    Ok(AppServices::new(store))
}

#[cfg(test)]
mod tests {
    use teller_accounts::NewAccount;

    use super::*;

    #[tokio::test]
    async fn in_memory_services_are_ready_to_use() {
        let services = build_services(&StorageConfig::InMemory).await.unwrap();

        let created = services
            .store()
            .create_account(NewAccount::new("Ada", "Lovelace").unwrap())
            .await
            .unwrap();
        assert_eq!(services.store().get_accounts().await.unwrap(), vec![created]);
    }
}
