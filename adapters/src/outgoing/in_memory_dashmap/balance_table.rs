use dashmap::DashMap;
use std::time::Duration;
use time::OffsetDateTime;
use tracing::{debug, instrument};

use domain::points::Balance;
use domain::user::UserId;
use point_ledger_application::{error::AppResult, ports::outgoing::balance_store::BalanceStorePort};

use super::simulate_latency;

pub struct InMemoryBalanceTable {
    balances: DashMap<UserId, Balance>,
    max_latency: Duration,
}

impl InMemoryBalanceTable {
    pub fn new(max_latency: Duration) -> Self {
        Self {
            balances: DashMap::new(),
            max_latency,
        }
    }
}

impl Default for InMemoryBalanceTable {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

#[async_trait::async_trait]
impl BalanceStorePort for InMemoryBalanceTable {
    #[instrument(skip(self))]
    async fn read_balance(&self, user_id: UserId) -> AppResult<Balance> {
        simulate_latency(self.max_latency).await;

        Ok(self
            .balances
            .get(&user_id)
            .map_or_else(|| Balance::empty(user_id), |entry| entry.value().clone()))
    }

    #[instrument(skip(self))]
    async fn write_balance(&self, user_id: UserId, amount: i64) -> AppResult<Balance> {
        simulate_latency(self.max_latency).await;

        let balance = Balance::new(user_id, amount, OffsetDateTime::now_utc())?;
        self.balances.insert(user_id, balance.clone());

        debug!("Stored balance {} for user {}", amount, user_id);

        Ok(balance)
    }
}
