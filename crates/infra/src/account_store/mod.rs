//! Account storage boundary.
//!
//! `AccountStore` hides the persistence engine; the API layer only ever sees
//! this trait, so tests can swap in the in-memory implementation.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryAccountStore;
pub use postgres::PostgresAccountStore;
pub use r#trait::{AccountStore, StoreError};
