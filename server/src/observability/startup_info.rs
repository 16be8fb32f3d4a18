use point_ledger_application::infrastructure_config::{Config, LockingConfig, StoreConfig};
use tracing::info;

pub fn print_api_info(config: &Config) {
    print_endpoint_info(config);
    print_configuration_info(config);
}

fn print_endpoint_info(config: &Config) {
    let base_url = format!("http://{}", config.server_address());
    info!("📋 Endpoints:");
    info!("  GET   {}/point/{{id}}", base_url);
    info!("  GET   {}/point/{{id}}/histories", base_url);
    info!("  PATCH {}/point/{{id}}/charge", base_url);
    info!("  PATCH {}/point/{{id}}/use", base_url);
    info!("  GET   {}/health", base_url);
}

fn print_configuration_info(config: &Config) {
    info!("⚙️  Configuration:");
    print_store_configuration(&config.store);
    print_locking_configuration(&config.locking);
}

fn print_store_configuration(store: &StoreConfig) {
    info!(
        "  🗄️  Store: in-memory, simulated latency balance {}ms / history {}ms",
        store.balance_latency_ms, store.history_latency_ms
    );
}

fn print_locking_configuration(locking: &LockingConfig) {
    if let Some(timeout_ms) = locking.acquire_timeout_ms {
        info!("  🔒 Per-user lock: acquire timeout {}ms", timeout_ms);
    } else {
        info!("  🔒 Per-user lock: wait until granted");
    }
}
