use thiserror::Error;

use domain::error::DomainError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: i64, available: i64 },

    #[error("Lock misuse: {message}")]
    LockMisuse { message: String },

    #[error("Timed out after {waited_ms}ms waiting for lock on user {user_id}")]
    LockTimeout { user_id: i64, waited_ms: u64 },

    #[error("Store error: {message}")]
    StoreError { message: String },

    #[error("Task error: {message}")]
    TaskError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

pub type AppResult<T> = Result<T, AppError>;
