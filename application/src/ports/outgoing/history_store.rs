use std::sync::Arc;
use time::OffsetDateTime;

use crate::error::AppResult;
use domain::history::{HistoryEntry, TransactionKind};
use domain::points::PointAmount;
use domain::user::UserId;

#[async_trait::async_trait]
pub trait HistoryStorePort: Send + Sync {
    async fn append_history(
        &self,
        user_id: UserId,
        amount: PointAmount,
        kind: TransactionKind,
        timestamp: OffsetDateTime,
    ) -> AppResult<HistoryEntry>;

    /// Entries for `user_id` in append order.
    async fn read_history(&self, user_id: UserId) -> AppResult<Vec<HistoryEntry>>;
}

pub type DynHistoryStorePort = Arc<dyn HistoryStorePort>;
