//! Configuration for the token service

use chrono::Duration;
use tg_shared::config::TokenConfig;

use crate::domain::entities::token::DEFAULT_TOKEN_LIFETIME_DAYS;

/// Bounds on the random part of a key. The stored key also carries a
/// ten-digit timestamp and must fit in 64 characters.
const MIN_KEY_LENGTH: usize = 16;
const MAX_KEY_LENGTH: usize = 48;

/// Bounds on the token lifetime, keeping expiration dates representable
const MIN_LIFETIME_DAYS: i64 = 1;
const MAX_LIFETIME_DAYS: i64 = 36_500;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Days a token stays valid after issue or renewal
    pub token_lifetime_days: i64,
    /// Random symbols per key, before the timestamp suffix
    pub key_length: usize,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            token_lifetime_days: DEFAULT_TOKEN_LIFETIME_DAYS,
            key_length: 32,
        }
    }
}

impl TokenServiceConfig {
    /// Validity window of an issued or renewed token
    pub fn lifetime(&self) -> Duration {
        Duration::days(
            self.token_lifetime_days
                .clamp(MIN_LIFETIME_DAYS, MAX_LIFETIME_DAYS),
        )
    }
}

impl From<&TokenConfig> for TokenServiceConfig {
    fn from(config: &TokenConfig) -> Self {
        Self {
            token_lifetime_days: config
                .lifetime_days
                .clamp(MIN_LIFETIME_DAYS, MAX_LIFETIME_DAYS),
            key_length: config.key_length.clamp(MIN_KEY_LENGTH, MAX_KEY_LENGTH),
        }
    }
}
