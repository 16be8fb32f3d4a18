#[cfg(any(feature = "adapters", feature = "axum", feature = "dashmap"))]
compile_error!("application must not depend on adapters/framework crates");

pub mod config;
pub mod error;
pub mod infrastructure_config;
pub mod points;
pub mod ports;
