use tracing::{debug, instrument, warn};

use domain::{
    history::{HistoryEntry, TransactionKind},
    points::{Balance, PointAmount},
    user::UserId,
};

use crate::{
    config::LockSettings,
    error::{AppError, AppResult},
    ports::{
        incoming::points::{PointCommandUseCase, PointQueryUseCase},
        outgoing::{
            balance_store::DynBalanceStorePort,
            history_store::DynHistoryStorePort,
            key_lock::{DynKeyLockPort, KeyLockGuard},
        },
    },
};

pub struct PointServiceDeps {
    pub balance_store: DynBalanceStorePort,
    pub history_store: DynHistoryStorePort,
    pub key_lock: DynKeyLockPort,
}

/// Applies credits and debits as read-modify-write sequences serialized per
/// user. Correctness relies only on the key lock, never on the store.
pub struct PointService {
    balance_store: DynBalanceStorePort,
    history_store: DynHistoryStorePort,
    key_lock: DynKeyLockPort,
    lock_settings: LockSettings,
}

impl PointService {
    pub fn new(deps: PointServiceDeps, lock_settings: LockSettings) -> Self {
        Self {
            balance_store: deps.balance_store,
            history_store: deps.history_store,
            key_lock: deps.key_lock,
            lock_settings,
        }
    }

    fn validate_amount(amount: i64) -> AppResult<PointAmount> {
        PointAmount::new(amount).map_err(|e| AppError::InvalidArgument {
            message: e.to_string(),
        })
    }

    async fn lock_user(&self, user_id: UserId) -> AppResult<KeyLockGuard> {
        match self.lock_settings.acquire_timeout {
            Some(timeout) => self.key_lock.lock_with_timeout(user_id, timeout).await,
            None => self.key_lock.lock(user_id).await,
        }
    }

    async fn commit(
        &self,
        user_id: UserId,
        new_amount: i64,
        amount: PointAmount,
        kind: TransactionKind,
    ) -> AppResult<Balance> {
        let updated = self
            .balance_store
            .write_balance(user_id, new_amount)
            .await?;

        self.history_store
            .append_history(user_id, amount, kind, updated.last_updated)
            .await?;

        debug!(
            "{} of {} applied for user {}, balance now {}",
            kind, amount, user_id, updated.amount
        );

        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn credit(&self, user_id: UserId, amount: i64) -> AppResult<Balance> {
        let amount = Self::validate_amount(amount)?;
        let _guard = self.lock_user(user_id).await?;

        let current = self.balance_store.read_balance(user_id).await?;
        let new_amount = current.credited(amount)?;

        self.commit(user_id, new_amount, amount, TransactionKind::Credit)
            .await
    }

    #[instrument(skip(self))]
    pub async fn debit(&self, user_id: UserId, amount: i64) -> AppResult<Balance> {
        let amount = Self::validate_amount(amount)?;
        let _guard = self.lock_user(user_id).await?;

        let current = self.balance_store.read_balance(user_id).await?;
        let remaining = current.debited(amount).map_err(|err| {
            warn!(
                "Debit rejected for user {}: required {}, available {}",
                user_id, err.required, err.available
            );
            AppError::InsufficientBalance {
                required: err.required,
                available: err.available,
            }
        })?;

        self.commit(user_id, remaining, amount, TransactionKind::Debit)
            .await
    }

    /// Unserialized read; may race with an in-flight mutation.
    #[instrument(skip(self))]
    pub async fn balance(&self, user_id: UserId) -> AppResult<Balance> {
        self.balance_store.read_balance(user_id).await
    }

    #[instrument(skip(self))]
    pub async fn history(&self, user_id: UserId) -> AppResult<Vec<HistoryEntry>> {
        self.history_store.read_history(user_id).await
    }
}

#[async_trait::async_trait]
impl PointCommandUseCase for PointService {
    async fn credit(&self, user_id: UserId, amount: i64) -> AppResult<Balance> {
        self.credit(user_id, amount).await
    }

    async fn debit(&self, user_id: UserId, amount: i64) -> AppResult<Balance> {
        self.debit(user_id, amount).await
    }
}

#[async_trait::async_trait]
impl PointQueryUseCase for PointService {
    async fn balance(&self, user_id: UserId) -> AppResult<Balance> {
        self.balance(user_id).await
    }

    async fn history(&self, user_id: UserId) -> AppResult<Vec<HistoryEntry>> {
        self.history(user_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    };
    use std::time::Duration;

    use time::OffsetDateTime;

    use super::*;
    use crate::ports::outgoing::{
        balance_store::BalanceStorePort, history_store::HistoryStorePort, key_lock::KeyLockPort,
    };

    #[derive(Default)]
    struct LockProbe {
        held: AtomicBool,
        acquisitions: AtomicUsize,
        releases: AtomicUsize,
        timed_acquisitions: AtomicUsize,
    }

    struct ProbeGuard(Arc<LockProbe>);

    impl Drop for ProbeGuard {
        fn drop(&mut self) {
            self.0.held.store(false, Ordering::SeqCst);
            self.0.releases.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct RecordingKeyLock {
        probe: Arc<LockProbe>,
    }

    impl RecordingKeyLock {
        fn guard(&self) -> KeyLockGuard {
            self.probe.held.store(true, Ordering::SeqCst);
            self.probe.acquisitions.fetch_add(1, Ordering::SeqCst);
            KeyLockGuard::new(ProbeGuard(Arc::clone(&self.probe)))
        }
    }

    #[async_trait::async_trait]
    impl KeyLockPort for RecordingKeyLock {
        async fn lock(&self, _key: UserId) -> AppResult<KeyLockGuard> {
            Ok(self.guard())
        }

        async fn lock_with_timeout(
            &self,
            _key: UserId,
            _timeout: Duration,
        ) -> AppResult<KeyLockGuard> {
            self.probe.timed_acquisitions.fetch_add(1, Ordering::SeqCst);
            Ok(self.guard())
        }

        async fn acquire(&self, _key: UserId) -> AppResult<()> {
            Ok(())
        }

        fn release(&self, key: UserId) -> AppResult<()> {
            Err(AppError::LockMisuse {
                message: format!("no unscoped holder for user {key}"),
            })
        }

        fn tracked_keys(&self) -> usize {
            self.probe.acquisitions.load(Ordering::SeqCst)
        }
    }

    struct FakeBalanceStore {
        probe: Arc<LockProbe>,
        balances: Mutex<HashMap<UserId, i64>>,
        writes: AtomicUsize,
        unlocked_access: AtomicUsize,
        fail_writes: bool,
    }

    impl FakeBalanceStore {
        fn note_access(&self) {
            if !self.probe.held.load(Ordering::SeqCst) {
                self.unlocked_access.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[async_trait::async_trait]
    impl BalanceStorePort for FakeBalanceStore {
        async fn read_balance(&self, user_id: UserId) -> AppResult<Balance> {
            self.note_access();
            let amount = self
                .balances
                .lock()
                .unwrap()
                .get(&user_id)
                .copied()
                .unwrap_or(0);
            Ok(Balance::new(user_id, amount, OffsetDateTime::UNIX_EPOCH)?)
        }

        async fn write_balance(&self, user_id: UserId, amount: i64) -> AppResult<Balance> {
            self.note_access();
            if self.fail_writes {
                return Err(AppError::StoreError {
                    message: "write refused".to_string(),
                });
            }
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.balances.lock().unwrap().insert(user_id, amount);
            Ok(Balance::new(user_id, amount, OffsetDateTime::now_utc())?)
        }
    }

    #[derive(Default)]
    struct FakeHistoryStore {
        entries: Mutex<Vec<HistoryEntry>>,
    }

    #[async_trait::async_trait]
    impl HistoryStorePort for FakeHistoryStore {
        async fn append_history(
            &self,
            user_id: UserId,
            amount: PointAmount,
            kind: TransactionKind,
            timestamp: OffsetDateTime,
        ) -> AppResult<HistoryEntry> {
            let mut entries = self.entries.lock().unwrap();
            let entry = HistoryEntry::new(
                entries.len() as u64 + 1,
                user_id,
                amount,
                kind,
                timestamp,
            );
            entries.push(entry.clone());
            Ok(entry)
        }

        async fn read_history(&self, user_id: UserId) -> AppResult<Vec<HistoryEntry>> {
            Ok(self
                .entries
                .lock()
                .unwrap()
                .iter()
                .filter(|entry| entry.user_id == user_id)
                .cloned()
                .collect())
        }
    }

    struct Harness {
        service: PointService,
        probe: Arc<LockProbe>,
        balances: Arc<FakeBalanceStore>,
        history: Arc<FakeHistoryStore>,
    }

    fn harness_with(fail_writes: bool, lock_settings: LockSettings) -> Harness {
        let probe = Arc::new(LockProbe::default());
        let balances = Arc::new(FakeBalanceStore {
            probe: Arc::clone(&probe),
            balances: Mutex::new(HashMap::new()),
            writes: AtomicUsize::new(0),
            unlocked_access: AtomicUsize::new(0),
            fail_writes,
        });
        let history = Arc::new(FakeHistoryStore::default());
        let service = PointService::new(
            PointServiceDeps {
                balance_store: Arc::clone(&balances) as DynBalanceStorePort,
                history_store: Arc::clone(&history) as DynHistoryStorePort,
                key_lock: Arc::new(RecordingKeyLock {
                    probe: Arc::clone(&probe),
                }),
            },
            lock_settings,
        );

        Harness {
            service,
            probe,
            balances,
            history,
        }
    }

    fn harness() -> Harness {
        harness_with(false, LockSettings::default())
    }

    fn user(id: i64) -> UserId {
        UserId::new(id).unwrap()
    }

    fn seed(h: &Harness, user_id: UserId, amount: i64) {
        h.balances.balances.lock().unwrap().insert(user_id, amount);
    }

    #[tokio::test]
    async fn credit_adds_amount_and_records_history() {
        let h = harness();
        seed(&h, user(1), 100);

        let balance = h.service.credit(user(1), 50).await.unwrap();

        assert_eq!(balance.amount, 150);
        let history = h.service.history(user(1)).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].kind, TransactionKind::Credit);
        assert_eq!(history[0].amount.get(), 50);
        assert_eq!(history[0].timestamp, balance.last_updated);
    }

    #[tokio::test]
    async fn credit_then_debit_keeps_history_in_order() {
        let h = harness();

        h.service.credit(user(1), 50).await.unwrap();
        let balance = h.service.debit(user(1), 30).await.unwrap();

        assert_eq!(balance.amount, 20);
        let kinds: Vec<_> = h
            .service
            .history(user(1))
            .await
            .unwrap()
            .iter()
            .map(|entry| (entry.kind, entry.amount.get()))
            .collect();
        assert_eq!(
            kinds,
            vec![(TransactionKind::Credit, 50), (TransactionKind::Debit, 30)]
        );
    }

    #[tokio::test]
    async fn non_positive_amounts_are_rejected_before_locking() {
        let h = harness();

        for amount in [0, -1, i64::MIN] {
            let credit = h.service.credit(user(1), amount).await;
            assert!(matches!(credit, Err(AppError::InvalidArgument { .. })));

            let debit = h.service.debit(user(1), amount).await;
            assert!(matches!(debit, Err(AppError::InvalidArgument { .. })));
        }

        assert_eq!(h.probe.acquisitions.load(Ordering::SeqCst), 0);
        assert_eq!(h.balances.writes.load(Ordering::SeqCst), 0);
        assert!(h.service.history(user(1)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn overdraft_is_rejected_without_side_effects() {
        let h = harness();
        seed(&h, user(1), 100);

        let result = h.service.debit(user(1), 101).await;

        assert!(matches!(
            result,
            Err(AppError::InsufficientBalance {
                required: 101,
                available: 100
            })
        ));
        assert_eq!(h.service.balance(user(1)).await.unwrap().amount, 100);
        assert_eq!(h.balances.writes.load(Ordering::SeqCst), 0);
        assert!(h.history.entries.lock().unwrap().is_empty());
        assert_eq!(h.probe.acquisitions.load(Ordering::SeqCst), 1);
        assert_eq!(h.probe.releases.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn debit_of_entire_balance_reaches_zero() {
        let h = harness();
        seed(&h, user(4), 75);

        let balance = h.service.debit(user(4), 75).await.unwrap();

        assert_eq!(balance.amount, 0);
    }

    #[tokio::test]
    async fn store_failure_propagates_and_releases_lock() {
        let h = harness_with(true, LockSettings::default());

        let result = h.service.credit(user(1), 10).await;

        assert!(matches!(result, Err(AppError::StoreError { .. })));
        assert!(h.history.entries.lock().unwrap().is_empty());
        assert_eq!(h.probe.releases.load(Ordering::SeqCst), 1);
        assert!(!h.probe.held.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn overflow_is_reported_and_nothing_is_written() {
        let h = harness();
        seed(&h, user(1), i64::MAX);

        let result = h.service.credit(user(1), 1).await;

        assert!(matches!(result, Err(AppError::Domain(_))));
        assert_eq!(h.balances.writes.load(Ordering::SeqCst), 0);
        assert_eq!(h.probe.releases.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn mutations_touch_the_store_only_while_locked() {
        let h = harness();

        h.service.credit(user(1), 10).await.unwrap();
        h.service.debit(user(1), 5).await.unwrap();

        assert_eq!(h.balances.unlocked_access.load(Ordering::SeqCst), 0);
        assert_eq!(
            h.probe.acquisitions.load(Ordering::SeqCst),
            h.probe.releases.load(Ordering::SeqCst)
        );
    }

    #[tokio::test]
    async fn reads_do_not_take_the_lock() {
        let h = harness();

        h.service.balance(user(9)).await.unwrap();
        h.service.history(user(9)).await.unwrap();

        assert_eq!(h.probe.acquisitions.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn configured_timeout_selects_timed_acquisition() {
        let h = harness_with(
            false,
            LockSettings {
                acquire_timeout: Some(Duration::from_millis(50)),
            },
        );

        h.service.credit(user(1), 10).await.unwrap();

        assert_eq!(h.probe.timed_acquisitions.load(Ordering::SeqCst), 1);
    }
}
