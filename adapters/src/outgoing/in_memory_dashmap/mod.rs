pub mod balance_table;
pub mod history_table;

use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;

/// Sleeps a random duration in `0..=max`, surfacing races the way a real
/// store round-trip would.
pub(crate) async fn simulate_latency(max: Duration) {
    if max.is_zero() {
        return;
    }

    let upper = u64::try_from(max.as_millis()).unwrap_or(u64::MAX);
    let millis = rand::rng().random_range(0..=upper);
    sleep(Duration::from_millis(millis)).await;
}
