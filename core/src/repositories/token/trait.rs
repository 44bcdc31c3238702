//! Token repository trait defining the interface for session token persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::token::AuthToken;
use crate::errors::DomainError;

/// Repository trait for AuthToken persistence operations
///
/// Implementations own the uniqueness guarantees: at most one row per
/// `user_id` and a globally unique `key`. A write that would break either
/// must fail with [`DomainError::Conflict`].
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Delete every token that has no expiration date
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of rows deleted
    async fn delete_without_expiration(&self) -> Result<usize, DomainError>;

    /// Find the token owned by a user
    ///
    /// # Arguments
    /// * `user_id` - The UUID of the user
    ///
    /// # Returns
    /// * `Ok(Some(AuthToken))` - The user's token, expired or not
    /// * `Ok(None)` - The user has no token
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<AuthToken>, DomainError>;

    /// Find a token by its bearer key
    ///
    /// # Arguments
    /// * `key` - The exact key presented by the client
    async fn find_by_key(&self, key: &str) -> Result<Option<AuthToken>, DomainError>;

    /// Insert a new token
    ///
    /// # Returns
    /// * `Ok(AuthToken)` - The stored token
    /// * `Err(DomainError::Conflict)` - The user already has a token or the key is taken
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::Duration;
    /// # use uuid::Uuid;
    /// # use tg_core::repositories::TokenRepository;
    /// # use tg_core::domain::entities::token::AuthToken;
    /// # async fn example(repo: &impl TokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let token = AuthToken::issue(Uuid::new_v4(), "key".to_string(), Duration::days(30));
    /// let saved = repo.create(token).await?;
    /// println!("Token expires at {:?}", saved.expiration_date);
    /// # Ok(())
    /// # }
    /// ```
    async fn create(&self, token: AuthToken) -> Result<AuthToken, DomainError>;

    /// Replace the key and expiration of an existing row
    ///
    /// The update only applies while the row still holds `previous_key`.
    ///
    /// # Returns
    /// * `Ok(true)` - The row was rotated
    /// * `Ok(false)` - The row is gone or was rotated by someone else
    /// * `Err(DomainError::Conflict)` - `new_key` is already in use
    async fn rotate_key(
        &self,
        id: Uuid,
        previous_key: &str,
        new_key: &str,
        expiration_date: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Delete a token by its bearer key
    ///
    /// # Returns
    /// * `Ok(true)` - Token deleted
    /// * `Ok(false)` - Token not found
    async fn delete_by_key(&self, key: &str) -> Result<bool, DomainError>;

    /// Delete every token whose expiration date is before `now`
    ///
    /// Used by the background sweep; request handling never calls it.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;
}
