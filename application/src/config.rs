use std::time::Duration;

use crate::infrastructure_config::Config;

#[derive(Debug, Clone, Default)]
pub struct LockSettings {
    /// `None` waits until the lock is granted.
    pub acquire_timeout: Option<Duration>,
}

impl LockSettings {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            acquire_timeout: config.acquire_timeout(),
        }
    }
}
