//! Mock credential verifier for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::CredentialVerifier;

/// Compares the password with `User::password_hash` verbatim
///
/// Can be switched into a failing mode to exercise verifier outages.
#[derive(Clone, Default)]
pub struct MockCredentialVerifier {
    failing: Arc<AtomicBool>,
}

impl MockCredentialVerifier {
    /// Create a verifier that answers normally
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the failing mode
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl CredentialVerifier for MockCredentialVerifier {
    async fn verify(&self, user: &User, password: &str) -> Result<bool, DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "credential store unavailable".to_string(),
            });
        }
        Ok(user.password_hash == password)
    }
}
