//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Primary identifier of an account, assigned by the store.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(i64);

/// Display/business number of an account, generated when the account is built.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountNumber(i64);

/// Account numbers are drawn from `0..ACCOUNT_NUMBER_SPACE`.
pub const ACCOUNT_NUMBER_SPACE: u64 = 1_000_000;

macro_rules! impl_i64_newtype {
    ($t:ty) => {
        impl $t {
            pub const fn from_i64(value: i64) -> Self {
                Self(value)
            }

            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}

impl_i64_newtype!(AccountId);
impl_i64_newtype!(AccountNumber);

impl FromStr for AccountId {
    type Err = DomainError;

    /// Accepts non-negative decimal integers only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<i64>() {
            Ok(v) if v >= 0 => Ok(Self(v)),
            _ => Err(DomainError::invalid_id(format!("invalid id given {s}"))),
        }
    }
}

impl AccountNumber {
    /// Generate a fresh account number.
    ///
    /// Uses the random tail of a UUIDv7. Prefer `from_i64` in tests for determinism.
    pub fn generate() -> Self {
        let (_, random) = Uuid::now_v7().as_u64_pair();
        Self((random % ACCOUNT_NUMBER_SPACE) as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_non_numeric_ids() {
        for raw in ["abc", "", "1.5", "12abc", " 7", "0x10"] {
            let err = raw.parse::<AccountId>().unwrap_err();
            assert_eq!(err, DomainError::InvalidId(format!("invalid id given {raw}")));
        }
    }

    #[test]
    fn rejects_overflowing_id() {
        assert!("9223372036854775808".parse::<AccountId>().is_err());
    }

    #[test]
    fn generated_numbers_stay_in_range() {
        for _ in 0..1_000 {
            let n = AccountNumber::generate().as_i64();
            assert!((0..ACCOUNT_NUMBER_SPACE as i64).contains(&n));
        }
    }

    #[test]
    fn ids_serialize_as_plain_integers() {
        let json = serde_json::to_string(&AccountId::from_i64(7)).unwrap();
        assert_eq!(json, "7");
    }

    proptest! {
        #[test]
        fn non_negative_ids_parse_back(v in 0i64..=i64::MAX) {
            let id: AccountId = v.to_string().parse().unwrap();
            prop_assert_eq!(id.as_i64(), v);
            prop_assert_eq!(id.to_string(), v.to_string());
        }

        #[test]
        fn negative_ids_are_rejected(v in i64::MIN..0i64) {
            prop_assert!(v.to_string().parse::<AccountId>().is_err());
        }
    }
}
