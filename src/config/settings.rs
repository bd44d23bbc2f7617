//! Application settings loaded from environment variables.

use std::env;

use super::constants::{DEFAULT_LOW_STOCK_THRESHOLD, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT};

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    /// Populate the stores with sample records on startup
    pub seed_data: bool,
    pub low_stock_threshold: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            seed_data: true,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable values fall back to their defaults, as does a
    /// negative low-stock threshold.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Self {
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            seed_data: parse_var("SEED_DATA").unwrap_or(defaults.seed_data),
            low_stock_threshold: non_negative(
                "LOW_STOCK_THRESHOLD",
                parse_var("LOW_STOCK_THRESHOLD"),
            )
            .unwrap_or(defaults.low_stock_threshold),
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring unparsable environment variable");
            None
        }
    }
}

fn non_negative(key: &str, value: Option<i64>) -> Option<i64> {
    match value {
        Some(v) if v < 0 => {
            tracing::warn!(key, value = v, "Ignoring negative environment variable");
            None
        }
        other => other,
    }
}
