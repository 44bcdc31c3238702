//! Token authentication configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Token lifecycle configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenConfig {
    /// How long an issued or renewed token stays valid, in days
    pub lifetime_days: i64,

    /// Number of random symbols in a generated key (before the timestamp suffix)
    pub key_length: usize,

    /// Request header carrying the raw token key
    #[serde(default = "default_header_name")]
    pub header_name: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            lifetime_days: 30,
            key_length: 32,
            header_name: default_header_name(),
        }
    }
}

impl TokenConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            lifetime_days: env_or("TOKEN_LIFETIME_DAYS", defaults.lifetime_days),
            key_length: env_or("TOKEN_KEY_LENGTH", defaults.key_length),
            header_name: std::env::var("TOKEN_HEADER")
                .ok()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(defaults.header_name),
        }
    }
}

/// Background sweep of expired tokens
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CleanupConfig {
    /// Whether the sweep runs at all
    pub enabled: bool,

    /// Seconds between two sweeps
    pub interval_seconds: u64,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: 3600,
        }
    }
}

impl CleanupConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: env_or("TOKEN_CLEANUP_ENABLED", defaults.enabled),
            interval_seconds: env_or("TOKEN_CLEANUP_INTERVAL_SECONDS", defaults.interval_seconds),
        }
    }
}

fn default_header_name() -> String {
    String::from("Authorization")
}
