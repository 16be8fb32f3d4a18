use std::sync::Arc;

use point_ledger_adapters::{
    outgoing::{
        in_memory_dashmap::{
            balance_table::InMemoryBalanceTable, history_table::InMemoryHistoryTable,
        },
        key_lock_tokio::key_lock_mutex::TokioKeyLockAdapter,
    },
    shared::app_state::AppState as AdaptersAppState,
};
use point_ledger_application::{
    config::LockSettings,
    infrastructure_config::Config,
    points::service::{PointService, PointServiceDeps},
    ports::{
        incoming::points::{PointCommandUseCase, PointQueryUseCase},
        outgoing::{
            balance_store::BalanceStorePort, history_store::HistoryStorePort,
            key_lock::KeyLockPort,
        },
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub point_service: Arc<PointService>,
    pub key_lock: Arc<dyn KeyLockPort>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);
        let key_lock: Arc<dyn KeyLockPort> = Arc::new(TokioKeyLockAdapter::new());
        let point_service = Self::create_point_service(&config, &key_lock);

        Self {
            config,
            point_service,
            key_lock,
        }
    }

    fn create_point_service(
        config: &Config,
        key_lock: &Arc<dyn KeyLockPort>,
    ) -> Arc<PointService> {
        let balance_store: Arc<dyn BalanceStorePort> =
            Arc::new(InMemoryBalanceTable::new(config.balance_latency()));
        let history_store: Arc<dyn HistoryStorePort> =
            Arc::new(InMemoryHistoryTable::new(config.history_latency()));

        Arc::new(PointService::new(
            PointServiceDeps {
                balance_store,
                history_store,
                key_lock: Arc::clone(key_lock),
            },
            LockSettings::from_config(config),
        ))
    }

    pub fn to_adapters_state(self) -> AdaptersAppState {
        AdaptersAppState::new(
            self.config,
            Arc::clone(&self.point_service) as Arc<dyn PointCommandUseCase + Send + Sync>,
            Arc::clone(&self.point_service) as Arc<dyn PointQueryUseCase + Send + Sync>,
            self.key_lock,
        )
    }
}
