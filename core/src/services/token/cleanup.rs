//! Token cleanup service for periodic removal of expired tokens
//!
//! Request handling only collects the token it touches. This sweep removes
//! expired tokens that are never presented again.

use std::sync::Arc;

use chrono::Utc;
use tg_shared::config::CleanupConfig;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::TokenRepository;

/// Configuration for token cleanup service
#[derive(Debug, Clone)]
pub struct TokenCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for TokenCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600,
            enabled: true,
        }
    }
}

impl From<&CleanupConfig> for TokenCleanupConfig {
    fn from(config: &CleanupConfig) -> Self {
        Self {
            interval_seconds: config.interval_seconds.max(1),
            enabled: config.enabled,
        }
    }
}

/// Service for cleaning up expired and malformed tokens
pub struct TokenCleanupService<R: TokenRepository + 'static> {
    repository: Arc<R>,
    config: TokenCleanupConfig,
}

impl<R: TokenRepository> TokenCleanupService<R> {
    /// Create a new token cleanup service
    pub fn new(repository: Arc<R>, config: TokenCleanupConfig) -> Self {
        Self { repository, config }
    }

    /// Run a single cleanup cycle
    ///
    /// Deletes rows without an expiration date, then rows whose expiration
    /// date has passed. A failing step is recorded in the result and does not
    /// stop the other.
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        info!("Starting token cleanup cycle");

        let mut result = CleanupResult::default();

        match self.repository.delete_without_expiration().await {
            Ok(count) => result.malformed_tokens_deleted = count,
            Err(e) => {
                error!("Failed to delete tokens without expiration: {}", e);
                result.errors.push(format!("Malformed token cleanup error: {}", e));
            }
        }

        match self.repository.delete_expired(Utc::now()).await {
            Ok(count) => result.expired_tokens_deleted = count,
            Err(e) => {
                error!("Failed to delete expired tokens: {}", e);
                result.errors.push(format!("Expired token cleanup error: {}", e));
            }
        }

        info!(
            "Token cleanup completed - Expired: {}, Malformed: {}",
            result.expired_tokens_deleted, result.malformed_tokens_deleted
        );

        Ok(result)
    }

    /// Start the cleanup service as a background task
    ///
    /// Returns `None` when cleanup is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Token cleanup service is disabled");
            return None;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        Some(tokio::spawn(async move {
            info!(
                "Token cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                match self.run_cleanup().await {
                    Ok(result) => {
                        if !result.errors.is_empty() {
                            warn!("Cleanup completed with errors: {:?}", result.errors);
                        }
                    }
                    Err(e) => {
                        error!("Token cleanup cycle failed: {}", e);
                    }
                }
            }
        }))
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default)]
pub struct CleanupResult {
    /// Number of expired tokens deleted
    pub expired_tokens_deleted: usize,
    /// Number of tokens without expiration date deleted
    pub malformed_tokens_deleted: usize,
    /// Any errors encountered during cleanup
    pub errors: Vec<String>,
}

impl CleanupResult {
    /// Check if the cleanup was successful (no errors)
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get total number of tokens deleted
    pub fn total_cleaned(&self) -> usize {
        self.expired_tokens_deleted + self.malformed_tokens_deleted
    }
}
