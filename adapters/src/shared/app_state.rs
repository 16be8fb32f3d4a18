use std::sync::Arc;

use point_ledger_application::{
    infrastructure_config::Config,
    ports::{
        incoming::points::{PointCommandUseCase, PointQueryUseCase},
        outgoing::key_lock::DynKeyLockPort,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub point_command_service: Arc<dyn PointCommandUseCase + Send + Sync>,
    pub point_query_service: Arc<dyn PointQueryUseCase + Send + Sync>,
    pub key_lock: DynKeyLockPort,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        point_command_service: Arc<dyn PointCommandUseCase + Send + Sync>,
        point_query_service: Arc<dyn PointQueryUseCase + Send + Sync>,
        key_lock: DynKeyLockPort,
    ) -> Self {
        Self {
            config,
            point_command_service,
            point_query_service,
            key_lock,
        }
    }
}
