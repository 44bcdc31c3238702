//! bcrypt implementation of the CredentialVerifier trait.

use async_trait::async_trait;
use tracing::debug;

use tg_core::domain::entities::user::User;
use tg_core::errors::DomainError;
use tg_core::services::credentials::CredentialVerifier;

/// Verifies passwords against bcrypt hashes stored on the user row
///
/// Hashing is CPU bound, so each check runs on the blocking thread pool.
#[derive(Debug, Clone, Default)]
pub struct BcryptCredentialVerifier;

impl BcryptCredentialVerifier {
    /// Create a new verifier
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CredentialVerifier for BcryptCredentialVerifier {
    async fn verify(&self, user: &User, password: &str) -> Result<bool, DomainError> {
        let password = password.to_owned();
        let hash = user.password_hash.clone();

        let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password check task failed: {}", e),
            })?
            .map_err(|e| DomainError::Internal {
                message: format!("Password check failed: {}", e),
            })?;

        debug!(user_id = %user.id, valid, "Password checked");
        Ok(valid)
    }
}

/// Hash a password with the default bcrypt cost
pub fn hash_password(password: &str) -> Result<String, DomainError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| DomainError::Internal {
        message: format!("Failed to hash password: {}", e),
    })
}
