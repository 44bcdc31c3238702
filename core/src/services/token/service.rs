//! Main token service implementation

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::token::{AuthToken, TokenIssue};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::TokenRepository;

use super::config::TokenServiceConfig;
use super::key::{generate_token_key, mask_key};

/// Service managing the single live token of each user
pub struct TokenService<R: TokenRepository> {
    repository: Arc<R>,
    config: TokenServiceConfig,
}

impl<R: TokenRepository> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `repository` - Token repository for persistence
    /// * `config` - Token service configuration
    pub fn new(repository: Arc<R>, config: TokenServiceConfig) -> Self {
        Self { repository, config }
    }

    /// Returns the service configuration
    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    fn new_key(&self) -> String {
        generate_token_key(self.config.key_length)
    }

    /// Returns a live key for an authenticated user
    ///
    /// Malformed rows without an expiration date are purged first. Then the
    /// user's token is created if absent, returned untouched if still valid,
    /// or renewed in place with a fresh key if expired.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenIssue)` - The live key and whether it was created or renewed
    /// * `Err(DomainError::Conflict)` - A concurrent request changed the user's token
    pub async fn issue_or_renew(&self, user_id: Uuid) -> DomainResult<TokenIssue> {
        let purged = self.repository.delete_without_expiration().await?;
        if purged > 0 {
            warn!(purged, "Deleted tokens without expiration date");
        }

        let now = Utc::now();

        match self.repository.find_by_user_id(user_id).await? {
            None => {
                let token = AuthToken::issue(user_id, self.new_key(), self.config.lifetime());
                let token = self.repository.create(token).await?;
                info!(%user_id, "Issued new token");
                Ok(TokenIssue::created(token.key))
            }
            Some(token) if !token.is_expired_at(now) => {
                debug!(%user_id, "Reusing valid token");
                Ok(TokenIssue::existing(token.key))
            }
            Some(token) => {
                let new_key = self.new_key();
                let expiration_date = now + self.config.lifetime();

                let rotated = self
                    .repository
                    .rotate_key(token.id, &token.key, &new_key, expiration_date)
                    .await?;
                if !rotated {
                    warn!(%user_id, "Token changed while renewing");
                    return Err(DomainError::Conflict {
                        message: "Token was modified concurrently".to_string(),
                    });
                }

                info!(%user_id, "Renewed expired token");
                Ok(TokenIssue::renewed(new_key))
            }
        }
    }

    /// Resolves a presented key to the owning user
    ///
    /// An absent or blank key is not an error: the caller is simply
    /// unauthenticated. An expired token is deleted before the error is
    /// returned, so retrying with the same key yields `TokenNotFound`.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Uuid))` - The user owning the key
    /// * `Ok(None)` - No key was presented
    /// * `Err(TokenError::TokenNotFound)` - Unknown key
    /// * `Err(TokenError::TokenExpired)` - Key expired (and is now deleted)
    pub async fn resolve_key_to_user(&self, key: Option<&str>) -> DomainResult<Option<Uuid>> {
        let Some(key) = normalize_key(key) else {
            return Ok(None);
        };

        let token = self
            .repository
            .find_by_key(key)
            .await?
            .ok_or(TokenError::TokenNotFound)?;

        if token.is_expired_at(Utc::now()) {
            // Match on the key so a concurrent renewal of the row survives.
            self.repository.delete_by_key(key).await?;
            info!(user_id = %token.user_id, key = %mask_key(key), "Deleted expired token");
            return Err(TokenError::TokenExpired.into());
        }

        Ok(Some(token.user_id))
    }

    /// Deletes the token holding `key`
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Token deleted
    /// * `Err(TokenError::MissingToken)` - No key was presented
    /// * `Err(TokenError::TokenNotFound)` - Unknown key
    pub async fn revoke(&self, key: Option<&str>) -> DomainResult<()> {
        let key = normalize_key(key).ok_or(TokenError::MissingToken)?;

        if !self.repository.delete_by_key(key).await? {
            return Err(TokenError::TokenNotFound.into());
        }

        info!(key = %mask_key(key), "Revoked token");
        Ok(())
    }
}

/// Trims the presented key and treats a blank one as missing
///
/// Keys never contain whitespace, so trimming cannot make two keys collide.
fn normalize_key(key: Option<&str>) -> Option<&str> {
    key.map(str::trim).filter(|k| !k.is_empty())
}
