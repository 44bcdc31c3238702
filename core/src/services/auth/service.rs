//! Main authentication service implementation

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::credentials::CredentialVerifier;
use crate::services::token::TokenService;

/// Authentication service tying users, credentials and tokens together
pub struct AuthService<U, T, V>
where
    U: UserRepository,
    T: TokenRepository,
    V: CredentialVerifier,
{
    /// User repository for login lookups
    user_repository: Arc<U>,
    /// Token service for issuing and resolving keys
    token_service: Arc<TokenService<T>>,
    /// Password checker
    credential_verifier: Arc<V>,
}

impl<U, T, V> AuthService<U, T, V>
where
    U: UserRepository,
    T: TokenRepository,
    V: CredentialVerifier,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user lookups
    /// * `token_service` - Service managing token lifecycle
    /// * `credential_verifier` - Password checker for users
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService<T>>,
        credential_verifier: Arc<V>,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            credential_verifier,
        }
    }

    /// Returns the token service used by this instance
    pub fn token_service(&self) -> &Arc<TokenService<T>> {
        &self.token_service
    }

    /// Authenticate with login and password and return a live token key
    ///
    /// An existing valid token is reused; an expired one is renewed.
    /// A verifier that cannot decide denies the login.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The token key
    /// * `Err(AuthError::UserNotFound)` - No active user with this login
    /// * `Err(AuthError::InvalidCredentials)` - Wrong password
    /// * `Err(AuthError::CredentialCheckUnavailable)` - Verifier failed
    pub async fn authenticate(&self, login: &str, password: &str) -> DomainResult<String> {
        let user = self
            .user_repository
            .find_by_login(login)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        match self.credential_verifier.verify(&user, password).await {
            Ok(true) => {}
            Ok(false) => {
                warn!(user_id = %user.id, "Login rejected: invalid password");
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => {
                error!(user_id = %user.id, "Credential check failed: {}", e);
                return Err(AuthError::CredentialCheckUnavailable.into());
            }
        }

        let issue = self.token_service.issue_or_renew(user.id).await?;
        info!(
            user_id = %user.id,
            created = issue.created,
            renewed = issue.renewed,
            "User logged in"
        );

        Ok(issue.key)
    }

    /// Revoke the token presented by the caller
    pub async fn logout(&self, key: Option<&str>) -> DomainResult<()> {
        self.token_service.revoke(key).await
    }

    /// Resolve a presented key to the full user record
    ///
    /// `Ok(None)` means no key was presented. A token whose user no longer
    /// exists yields `UserNotFound`.
    pub async fn current_user(&self, key: Option<&str>) -> DomainResult<Option<User>> {
        let Some(user_id) = self.token_service.resolve_key_to_user(key).await? else {
            return Ok(None);
        };

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        debug!(user_id = %user.id, "Resolved current user");
        Ok(Some(user))
    }
}
