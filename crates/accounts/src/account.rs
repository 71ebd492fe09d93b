use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use teller_core::{AccountId, AccountNumber, DomainError, DomainResult};

/// Longest first/last name accepted (matches the storage column width).
pub const MAX_NAME_LEN: usize = 50;

/// A persisted account.
///
/// Only the store hands these out: `id` is assigned on insert and never changes,
/// `created_at` is fixed when the `NewAccount` is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    pub first_name: String,
    pub last_name: String,
    pub number: AccountNumber,
    /// Amount in smallest unit (e.g., cents).
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

/// An account that has been built but not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    first_name: String,
    last_name: String,
    number: AccountNumber,
    balance: i64,
    created_at: DateTime<Utc>,
}

impl NewAccount {
    /// Build a new account with a freshly generated number and zero balance.
    pub fn new(first_name: &str, last_name: &str) -> DomainResult<Self> {
        Self::with_number(first_name, last_name, AccountNumber::generate())
    }

    /// Same as `new`, but with a caller-chosen account number.
    pub fn with_number(
        first_name: &str,
        last_name: &str,
        number: AccountNumber,
    ) -> DomainResult<Self> {
        Ok(Self {
            first_name: validate_name("firstName", first_name)?,
            last_name: validate_name("lastName", last_name)?,
            number,
            balance: 0,
            // Postgres keeps microseconds; truncate so reads round-trip exactly.
            created_at: Utc::now().trunc_subsecs(6),
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Attach the store-assigned identifier.
    pub fn into_account(self, id: AccountId) -> Account {
        Account {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            number: self.number,
            balance: self.balance,
            created_at: self.created_at,
        }
    }
}

fn validate_name(field: &str, raw: &str) -> DomainResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::validation(format!("{field} must not be empty")));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::validation(format!(
            "{field} must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_account_starts_with_zero_balance() {
        let before = Utc::now().trunc_subsecs(6);
        let acc = NewAccount::new("Ada", "Lovelace").unwrap();

        assert_eq!(acc.first_name(), "Ada");
        assert_eq!(acc.last_name(), "Lovelace");
        assert_eq!(acc.balance(), 0);
        assert!(acc.created_at() >= before);
        assert_eq!(acc.created_at().timestamp_subsec_nanos() % 1_000, 0);
    }

    #[test]
    fn names_are_trimmed() {
        let acc = NewAccount::new("  Grace ", "Hopper\n").unwrap();
        assert_eq!(acc.first_name(), "Grace");
        assert_eq!(acc.last_name(), "Hopper");
    }

    #[test]
    fn blank_names_are_rejected() {
        let err = NewAccount::new("   ", "Hopper").unwrap_err();
        assert_eq!(err, DomainError::validation("firstName must not be empty"));

        let err = NewAccount::new("Grace", "").unwrap_err();
        assert_eq!(err, DomainError::validation("lastName must not be empty"));
    }

    #[test]
    fn overlong_names_are_rejected() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(NewAccount::new(&long, "Hopper").is_err());
        assert!(NewAccount::new(&"x".repeat(MAX_NAME_LEN), "Hopper").is_ok());
    }

    #[test]
    fn account_serializes_with_camel_case_keys() {
        let acc = NewAccount::with_number("Ada", "Lovelace", AccountNumber::from_i64(42))
            .unwrap()
            .into_account(AccountId::from_i64(7));

        let json = serde_json::to_value(&acc).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["lastName"], "Lovelace");
        assert_eq!(json["number"], 42);
        assert_eq!(json["balance"], 0);
        assert!(json["createdAt"].is_string());
    }
}
