//! Configuration module for the TechFunding backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Simulated payment settlement delay in milliseconds
    pub settle_delay_ms: u64,
    /// Whether to seed the sample catalog into an empty database
    pub seed_sample_data: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("TECHFUND_DB_PATH")
            .unwrap_or_else(|_| "./data/app.sqlite".to_string())
            .into();

        let bind_addr = env::var("TECHFUND_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid TECHFUND_BIND_ADDR format");

        let log_level = env::var("TECHFUND_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let settle_delay_ms = env::var("TECHFUND_SETTLE_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1000);

        let seed_sample_data = env::var("TECHFUND_SEED_SAMPLE_DATA")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        Self {
            db_path,
            bind_addr,
            log_level,
            settle_delay_ms,
            seed_sample_data,
        }
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}
