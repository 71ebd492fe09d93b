//! Accounts module (the account entity and its construction rules).
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod account;

pub use account::{Account, NewAccount, MAX_NAME_LEN};
