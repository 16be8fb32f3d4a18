use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use crate::error::AppResult;
use domain::user::UserId;

/// Proof that the holder owns the exclusion for one key.
/// Dropping the guard releases the key.
pub struct KeyLockGuard {
    _held: Box<dyn Any + Send + Sync>,
}

impl KeyLockGuard {
    pub fn new<G>(held: G) -> Self
    where
        G: Any + Send + Sync,
    {
        Self {
            _held: Box::new(held),
        }
    }

    /// Releases before the end of the enclosing scope.
    pub fn release(self) {
        drop(self);
    }
}

/// Key-scoped mutual exclusion. Holding the lock for one user never blocks
/// callers working on another user.
#[async_trait::async_trait]
pub trait KeyLockPort: Send + Sync {
    /// Waits until `key` is free and returns a guard that owns it.
    async fn lock(&self, key: UserId) -> AppResult<KeyLockGuard>;

    /// Like [`KeyLockPort::lock`] but gives up after `timeout`. A timed out
    /// attempt leaves the key exactly as it found it.
    async fn lock_with_timeout(&self, key: UserId, timeout: Duration) -> AppResult<KeyLockGuard>;

    /// Unscoped acquisition, paired with [`KeyLockPort::release`].
    async fn acquire(&self, key: UserId) -> AppResult<()>;

    /// Releases an exclusion taken with [`KeyLockPort::acquire`]. Fails with
    /// `AppError::LockMisuse` when nobody holds `key` through `acquire`.
    fn release(&self, key: UserId) -> AppResult<()>;

    /// Number of keys that have ever been locked.
    fn tracked_keys(&self) -> usize;
}

pub type DynKeyLockPort = Arc<dyn KeyLockPort>;
