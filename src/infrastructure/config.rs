//! Application configuration

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Character/event backend base URL (without the `/api` suffix)
    pub backend_base_url: String,
    /// Timeout for a single backend request
    pub backend_timeout: Duration,

    /// HTTP server port
    pub server_port: u16,

    /// Suggested delay before a client reveals a play result
    pub reveal_delay: Duration,
    /// Fixed seed for reproducible plays; entropy when unset
    pub rng_seed: Option<u64>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            backend_base_url: lookup("BACKEND_BASE_URL")
                .unwrap_or_else(|| "http://localhost:8000".to_string()),
            backend_timeout: Duration::from_secs(
                lookup("BACKEND_TIMEOUT_SECS")
                    .unwrap_or_else(|| "10".to_string())
                    .parse()
                    .context("BACKEND_TIMEOUT_SECS must be a whole number of seconds")?,
            ),

            server_port: lookup("SERVER_PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,

            reveal_delay: Duration::from_millis(
                lookup("PLAY_REVEAL_DELAY_MS")
                    .unwrap_or_else(|| "900".to_string())
                    .parse()
                    .context("PLAY_REVEAL_DELAY_MS must be a whole number of milliseconds")?,
            ),
            rng_seed: lookup("PLAY_RNG_SEED")
                .map(|seed| seed.parse())
                .transpose()
                .context("PLAY_RNG_SEED must be an unsigned 64-bit integer")?,
        })
    }
}
