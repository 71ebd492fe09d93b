//! Postgres account store against a live database.
//!
//! Runs only when `TEST_DATABASE_URL` points at a scratch database; otherwise
//! each test returns early.

use chrono::{SubsecRound, Utc};
use teller_accounts::NewAccount;
use teller_core::AccountId;
use teller_infra::account_store::{AccountStore, PostgresAccountStore, StoreError};

async fn store() -> Option<PostgresAccountStore> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let store = PostgresAccountStore::connect(&url, 2)
        .await
        .expect("failed to connect to TEST_DATABASE_URL");
    store.init().await.expect("schema init failed");
    Some(store)
}

#[tokio::test]
async fn init_can_run_twice() {
    let Some(store) = store().await else { return };
    store.init().await.unwrap();
}

#[tokio::test]
async fn create_get_delete_lifecycle() {
    let Some(store) = store().await else { return };
    let before = Utc::now().trunc_subsecs(6);

    let created = store
        .create_account(NewAccount::new("Ada", "Lovelace").unwrap())
        .await
        .unwrap();
    assert!(created.id.as_i64() > 0);

    let fetched = store.get_account_by_id(created.id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.balance, 0);
    assert!(fetched.created_at >= before);

    store.delete_account(created.id).await.unwrap();
    assert_eq!(
        store.get_account_by_id(created.id).await,
        Err(StoreError::NotFound(created.id))
    );
    assert_eq!(
        store.delete_account(created.id).await,
        Err(StoreError::NotFound(created.id))
    );
}

#[tokio::test]
async fn list_is_ordered_by_id() {
    let Some(store) = store().await else { return };

    let a = store
        .create_account(NewAccount::new("Grace", "Hopper").unwrap())
        .await
        .unwrap();
    let b = store
        .create_account(NewAccount::new("Alan", "Turing").unwrap())
        .await
        .unwrap();

    let ids: Vec<AccountId> = store
        .get_accounts()
        .await
        .unwrap()
        .into_iter()
        .map(|acc| acc.id)
        .collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert!(ids.contains(&a.id) && ids.contains(&b.id));

    store.delete_account(a.id).await.unwrap();
    store.delete_account(b.id).await.unwrap();
}
