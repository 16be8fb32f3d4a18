use std::collections::HashMap;
use std::time::Duration;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use domain::history::{HistoryEntry, TransactionKind};
use domain::points::PointAmount;
use domain::user::UserId;
use point_ledger_application::{
    error::{AppError, AppResult},
    ports::outgoing::history_store::HistoryStorePort,
};

use super::simulate_latency;

#[derive(Default)]
struct HistoryData {
    entries_by_user: HashMap<UserId, Vec<HistoryEntry>>,
    cursor: u64,
}

/// Append-only history. Entry ids are global and start at 1.
pub struct InMemoryHistoryTable {
    data: RwLock<HistoryData>,
    max_latency: Duration,
}

impl InMemoryHistoryTable {
    pub fn new(max_latency: Duration) -> Self {
        Self {
            data: RwLock::new(HistoryData::default()),
            max_latency,
        }
    }
}

impl Default for InMemoryHistoryTable {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

#[async_trait::async_trait]
impl HistoryStorePort for InMemoryHistoryTable {
    #[instrument(skip(self))]
    async fn append_history(
        &self,
        user_id: UserId,
        amount: PointAmount,
        kind: TransactionKind,
        timestamp: OffsetDateTime,
    ) -> AppResult<HistoryEntry> {
        simulate_latency(self.max_latency).await;

        let mut data = self.data.write().await;
        let entry_id = data
            .cursor
            .checked_add(1)
            .ok_or_else(|| AppError::StoreError {
                message: "History entry id space exhausted".to_string(),
            })?;
        data.cursor = entry_id;

        let entry = HistoryEntry::new(entry_id, user_id, amount, kind, timestamp);
        data.entries_by_user
            .entry(user_id)
            .or_default()
            .push(entry.clone());

        debug!("Appended history entry {} for user {}", entry_id, user_id);

        Ok(entry)
    }

    #[instrument(skip(self))]
    async fn read_history(&self, user_id: UserId) -> AppResult<Vec<HistoryEntry>> {
        simulate_latency(self.max_latency).await;

        let data = self.data.read().await;
        Ok(data
            .entries_by_user
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }
}
