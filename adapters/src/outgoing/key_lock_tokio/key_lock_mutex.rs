use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::time::timeout;
use tracing::{error, warn};

use domain::user::UserId;
use point_ledger_application::{
    error::{AppError, AppResult},
    ports::outgoing::key_lock::{KeyLockGuard, KeyLockPort},
};

/// One FIFO-fair tokio mutex per user, created on first use and never
/// evicted. Distinct users map to distinct mutexes and never contend.
#[derive(Default)]
pub struct TokioKeyLockAdapter {
    locks: DashMap<UserId, Arc<Mutex<()>>>,
    unscoped: DashMap<UserId, OwnedMutexGuard<()>>,
}

impl TokioKeyLockAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    // The entry API holds the shard write lock, so racing first callers
    // for a new key all get the same mutex.
    fn mutex_for(&self, key: UserId) -> Arc<Mutex<()>> {
        Arc::clone(self.locks.entry(key).or_default().value())
    }

    pub fn is_locked(&self, key: UserId) -> bool {
        self.locks
            .get(&key)
            .is_some_and(|mutex| mutex.try_lock().is_err())
    }
}

#[async_trait::async_trait]
impl KeyLockPort for TokioKeyLockAdapter {
    async fn lock(&self, key: UserId) -> AppResult<KeyLockGuard> {
        let guard = self.mutex_for(key).lock_owned().await;
        Ok(KeyLockGuard::new(guard))
    }

    async fn lock_with_timeout(&self, key: UserId, wait: Duration) -> AppResult<KeyLockGuard> {
        let mutex = self.mutex_for(key);

        if let Ok(guard) = timeout(wait, mutex.lock_owned()).await {
            return Ok(KeyLockGuard::new(guard));
        }

        warn!(
            "Gave up waiting {}ms for lock on user {}",
            wait.as_millis(),
            key
        );
        Err(AppError::LockTimeout {
            user_id: key.get(),
            waited_ms: u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
        })
    }

    async fn acquire(&self, key: UserId) -> AppResult<()> {
        let guard = self.mutex_for(key).lock_owned().await;
        self.unscoped.insert(key, guard);
        Ok(())
    }

    fn release(&self, key: UserId) -> AppResult<()> {
        if let Some((_, guard)) = self.unscoped.remove(&key) {
            drop(guard);
            return Ok(());
        }

        error!("Release requested for user {} without a matching acquire", key);
        Err(AppError::LockMisuse {
            message: format!("user {key} is not held by an unscoped acquire"),
        })
    }

    fn tracked_keys(&self) -> usize {
        self.locks.len()
    }
}
