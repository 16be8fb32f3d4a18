use crate::error::AppResult;
use domain::{history::HistoryEntry, points::Balance, user::UserId};

#[async_trait::async_trait]
pub trait PointCommandUseCase: Send + Sync {
    async fn credit(&self, user_id: UserId, amount: i64) -> AppResult<Balance>;

    async fn debit(&self, user_id: UserId, amount: i64) -> AppResult<Balance>;
}

#[async_trait::async_trait]
pub trait PointQueryUseCase: Send + Sync {
    async fn balance(&self, user_id: UserId) -> AppResult<Balance>;

    async fn history(&self, user_id: UserId) -> AppResult<Vec<HistoryEntry>>;
}
