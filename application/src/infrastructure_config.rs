use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{AppError, AppResult};

const MAX_SIMULATED_LATENCY_MS: u64 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub locking: LockingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: Option<String>,
}

/// Per-call artificial delay of the in-memory tables. Zero disables it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub balance_latency_ms: u64,
    pub history_latency_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockingConfig {
    #[serde(default)]
    pub acquire_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub include_location: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LogFormat {
    #[serde(rename = "json")]
    Json,
    #[serde(rename = "pretty")]
    Pretty,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                cors_origin: None,
            },
            store: StoreConfig {
                balance_latency_ms: 0,
                history_latency_ms: 0,
            },
            locking: LockingConfig {
                acquire_timeout_ms: None,
            },
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: LogFormat::Pretty,
                include_location: false,
            },
        }
    }
}

impl Config {
    pub fn validate(&self) -> AppResult<()> {
        if self.server.host.trim().is_empty() {
            return Err(AppError::ConfigError {
                message: "server.host cannot be empty".to_string(),
            });
        }

        if self.server.port == 0 {
            return Err(AppError::ConfigError {
                message: "server.port must be > 0".to_string(),
            });
        }

        if self.store.balance_latency_ms > MAX_SIMULATED_LATENCY_MS
            || self.store.history_latency_ms > MAX_SIMULATED_LATENCY_MS
        {
            return Err(AppError::ConfigError {
                message: format!(
                    "store latencies must not exceed {MAX_SIMULATED_LATENCY_MS}ms"
                ),
            });
        }

        if self.locking.acquire_timeout_ms == Some(0) {
            return Err(AppError::ConfigError {
                message: "locking.acquire_timeout_ms must be > 0 when set".to_string(),
            });
        }

        if self.logging.level.trim().is_empty() {
            return Err(AppError::ConfigError {
                message: "logging.level cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    #[must_use]
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[must_use]
    pub fn acquire_timeout(&self) -> Option<Duration> {
        self.locking.acquire_timeout_ms.map(Duration::from_millis)
    }

    #[must_use]
    pub fn balance_latency(&self) -> Duration {
        Duration::from_millis(self.store.balance_latency_ms)
    }

    #[must_use]
    pub fn history_latency(&self) -> Duration {
        Duration::from_millis(self.store.history_latency_ms)
    }
}
