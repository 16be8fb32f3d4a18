use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid user id: {0} (must be a positive integer)")]
    InvalidUserId(i64),

    #[error("Invalid amount: {0} (must be greater than zero)")]
    NonPositiveAmount(i64),

    #[error("Balance cannot be negative: {0}")]
    NegativeBalance(i64),

    #[error("Balance overflow: {current} + {amount} exceeds the representable range")]
    BalanceOverflow { current: i64, amount: i64 },
}

pub type DomainResult<T> = Result<T, DomainError>;
