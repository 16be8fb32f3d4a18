use std::sync::Arc;

use crate::error::AppResult;
use domain::points::Balance;
use domain::user::UserId;

/// Point-in-time read and unconditional overwrite of a user's balance record.
/// Each call is atomic on its own; a read followed by a write is not.
#[async_trait::async_trait]
pub trait BalanceStorePort: Send + Sync {
    async fn read_balance(&self, user_id: UserId) -> AppResult<Balance>;
    async fn write_balance(&self, user_id: UserId, amount: i64) -> AppResult<Balance>;
}

pub type DynBalanceStorePort = Arc<dyn BalanceStorePort>;
