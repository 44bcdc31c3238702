//! In-memory implementation of TokenRepository for tests and local runs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::AuthToken;
use crate::errors::DomainError;

use super::r#trait::TokenRepository;

/// Mock token repository keyed by row id
///
/// Enforces the same uniqueness rules as the database schema.
#[derive(Clone)]
pub struct MockTokenRepository {
    tokens: Arc<RwLock<HashMap<Uuid, AuthToken>>>,
}

impl MockTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Store a row as-is, bypassing uniqueness checks
    ///
    /// Lets tests seed malformed or expired rows.
    pub async fn insert_raw(&self, token: AuthToken) {
        self.tokens.write().await.insert(token.id, token);
    }

    /// Overwrite the expiration date of the row holding `key`
    pub async fn set_expiration(&self, key: &str, expiration_date: Option<DateTime<Utc>>) -> bool {
        let mut tokens = self.tokens.write().await;
        match tokens.values_mut().find(|t| t.key == key) {
            Some(token) => {
                token.expiration_date = expiration_date;
                true
            }
            None => false,
        }
    }

    /// Number of stored rows
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// Whether the repository holds no rows
    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }

    /// Snapshot of all stored rows
    pub async fn all(&self) -> Vec<AuthToken> {
        self.tokens.read().await.values().cloned().collect()
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn delete_without_expiration(&self) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let initial_count = tokens.len();

        tokens.retain(|_, token| token.expiration_date.is_some());

        Ok(initial_count - tokens.len())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<AuthToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.values().find(|t| t.user_id == user_id).cloned())
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<AuthToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.values().find(|t| t.key == key).cloned())
    }

    async fn create(&self, token: AuthToken) -> Result<AuthToken, DomainError> {
        let mut tokens = self.tokens.write().await;

        if tokens.values().any(|t| t.user_id == token.user_id) {
            return Err(DomainError::Conflict {
                message: "User already has a token".to_string(),
            });
        }
        if tokens.values().any(|t| t.key == token.key) {
            return Err(DomainError::Conflict {
                message: "Token key already exists".to_string(),
            });
        }

        tokens.insert(token.id, token.clone());
        Ok(token)
    }

    async fn rotate_key(
        &self,
        id: Uuid,
        previous_key: &str,
        new_key: &str,
        expiration_date: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().await;

        if tokens.values().any(|t| t.id != id && t.key == new_key) {
            return Err(DomainError::Conflict {
                message: "Token key already exists".to_string(),
            });
        }

        match tokens.get_mut(&id) {
            Some(token) if token.key == previous_key => {
                token.key = new_key.to_string();
                token.expiration_date = Some(expiration_date);
                token.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_by_key(&self, key: &str) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().await;
        let initial_count = tokens.len();

        tokens.retain(|_, token| token.key != key);

        Ok(tokens.len() < initial_count)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let initial_count = tokens.len();

        tokens.retain(|_, token| matches!(token.expiration_date, Some(exp) if exp >= now));

        Ok(initial_count - tokens.len())
    }
}
