//! Infrastructure layer: account storage and process configuration.

pub mod account_store;
pub mod config;
