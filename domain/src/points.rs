use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{self, Display, Formatter, Result as FmtResult};
use time::OffsetDateTime;

use crate::error::{DomainError, DomainResult};
use crate::user::UserId;

/// Magnitude of a single credit or debit. Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct PointAmount(i64);

impl PointAmount {
    pub fn new(amount: i64) -> DomainResult<Self> {
        if amount <= 0 {
            return Err(DomainError::NonPositiveAmount(amount));
        }
        Ok(Self(amount))
    }

    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for PointAmount {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PointAmount> for i64 {
    fn from(amount: PointAmount) -> Self {
        amount.0
    }
}

impl fmt::Display for PointAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    pub user_id: UserId,
    pub amount: i64,
    pub last_updated: OffsetDateTime,
}

impl Balance {
    pub fn new(user_id: UserId, amount: i64, last_updated: OffsetDateTime) -> DomainResult<Self> {
        if amount < 0 {
            return Err(DomainError::NegativeBalance(amount));
        }
        Ok(Self {
            user_id,
            amount,
            last_updated,
        })
    }

    /// Balance of a user that has never been written.
    #[must_use]
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            amount: 0,
            last_updated: OffsetDateTime::now_utc(),
        }
    }

    pub fn credited(&self, amount: PointAmount) -> DomainResult<i64> {
        self.amount
            .checked_add(amount.get())
            .ok_or(DomainError::BalanceOverflow {
                current: self.amount,
                amount: amount.get(),
            })
    }

    pub fn debited(&self, amount: PointAmount) -> Result<i64, InsufficientBalanceError> {
        let remaining = self.amount - amount.get();

        if remaining < 0 {
            return Err(InsufficientBalanceError {
                required: amount.get(),
                available: self.amount,
            });
        }

        Ok(remaining)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsufficientBalanceError {
    pub required: i64,
    pub available: i64,
}

impl Display for InsufficientBalanceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "Insufficient balance: required {}, available {}",
            self.required, self.available
        )
    }
}

impl Error for InsufficientBalanceError {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user(id: i64) -> UserId {
        UserId::new(id).unwrap()
    }

    fn amount(value: i64) -> PointAmount {
        PointAmount::new(value).unwrap()
    }

    #[test]
    fn amount_must_be_positive() {
        assert_eq!(PointAmount::new(0), Err(DomainError::NonPositiveAmount(0)));
        assert_eq!(
            PointAmount::new(-1),
            Err(DomainError::NonPositiveAmount(-1))
        );
        assert_eq!(PointAmount::new(1).map(PointAmount::get), Ok(1));
    }

    #[test]
    fn balance_rejects_negative_amount() {
        let result = Balance::new(user(1), -1, OffsetDateTime::UNIX_EPOCH);
        assert_eq!(result, Err(DomainError::NegativeBalance(-1)));
    }

    #[test]
    fn empty_balance_starts_at_zero() {
        let balance = Balance::empty(user(3));
        assert_eq!(balance.user_id, user(3));
        assert_eq!(balance.amount, 0);
    }

    #[test]
    fn credit_adds_and_detects_overflow() {
        let balance = Balance::new(user(1), 100, OffsetDateTime::UNIX_EPOCH).unwrap();
        assert_eq!(balance.credited(amount(50)), Ok(150));

        let full = Balance::new(user(1), i64::MAX, OffsetDateTime::UNIX_EPOCH).unwrap();
        assert_eq!(
            full.credited(amount(1)),
            Err(DomainError::BalanceOverflow {
                current: i64::MAX,
                amount: 1
            })
        );
    }

    #[test]
    fn debit_never_goes_negative() {
        let balance = Balance::new(user(1), 100, OffsetDateTime::UNIX_EPOCH).unwrap();

        assert_eq!(balance.debited(amount(100)), Ok(0));
        assert_eq!(
            balance.debited(amount(101)),
            Err(InsufficientBalanceError {
                required: 101,
                available: 100
            })
        );
    }
}
