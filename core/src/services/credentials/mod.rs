//! Credential verification seam
//!
//! Password hashing lives outside the token service. The service only asks a
//! verifier whether a password matches a user.

mod mock;

pub use mock::MockCredentialVerifier;

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Checks a password against the credentials stored for a user
///
/// Implementations must not log the password or the stored hash.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Verify `password` for `user`
    ///
    /// # Returns
    /// * `Ok(true)` - The password matches
    /// * `Ok(false)` - The password does not match
    /// * `Err(DomainError)` - The verifier could not decide
    async fn verify(&self, user: &User, password: &str) -> Result<bool, DomainError>;
}
