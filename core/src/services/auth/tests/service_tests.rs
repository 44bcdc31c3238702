//! Unit tests for authentication service

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{MockTokenRepository, MockUserRepository, TokenRepository};
use crate::services::auth::AuthService;
use crate::services::credentials::MockCredentialVerifier;
use crate::services::token::{TokenService, TokenServiceConfig};

type TestAuthService = AuthService<MockUserRepository, MockTokenRepository, MockCredentialVerifier>;

struct Fixture {
    service: TestAuthService,
    users: Arc<MockUserRepository>,
    tokens: Arc<MockTokenRepository>,
    verifier: Arc<MockCredentialVerifier>,
    alice: User,
}

async fn fixture() -> Fixture {
    let users = Arc::new(MockUserRepository::new());
    let tokens = Arc::new(MockTokenRepository::new());
    let verifier = Arc::new(MockCredentialVerifier::new());

    let alice = users
        .insert(User::new("alice", "wonderland").with_name("Alice"))
        .await
        .unwrap();

    let token_service = Arc::new(TokenService::new(
        tokens.clone(),
        TokenServiceConfig::default(),
    ));
    let service = AuthService::new(users.clone(), token_service, verifier.clone());

    Fixture {
        service,
        users,
        tokens,
        verifier,
        alice,
    }
}

#[tokio::test]
async fn test_login_then_resolve_returns_same_user() {
    let f = fixture().await;

    let key = f.service.authenticate("alice", "wonderland").await.unwrap();
    let user = f.service.current_user(Some(&key)).await.unwrap().unwrap();

    assert_eq!(user.id, f.alice.id);
    assert_eq!(user.login, "alice");
}

#[tokio::test]
async fn test_repeated_login_reuses_key() {
    let f = fixture().await;

    let first = f.service.authenticate("alice", "wonderland").await.unwrap();
    let second = f.service.authenticate("alice", "wonderland").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(f.tokens.len().await, 1);
}

#[tokio::test]
async fn test_unknown_login() {
    let f = fixture().await;

    let result = f.service.authenticate("bob", "wonderland").await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
    assert!(f.tokens.is_empty().await);
}

#[tokio::test]
async fn test_login_is_case_sensitive() {
    let f = fixture().await;

    let result = f.service.authenticate("Alice", "wonderland").await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}

#[tokio::test]
async fn test_wrong_password() {
    let f = fixture().await;

    let result = f.service.authenticate("alice", "looking-glass").await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
    assert!(f.tokens.is_empty().await);
}

#[tokio::test]
async fn test_failing_verifier_denies_login() {
    let f = fixture().await;
    f.verifier.set_failing(true);

    let result = f.service.authenticate("alice", "wonderland").await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::CredentialCheckUnavailable))
    ));
    assert!(f.tokens.is_empty().await);
}

#[tokio::test]
async fn test_inactive_user_cannot_login() {
    let f = fixture().await;
    let mut bob = User::new("bob", "builder");
    bob.deactivate();
    f.users.insert(bob).await.unwrap();

    let result = f.service.authenticate("bob", "builder").await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}

#[tokio::test]
async fn test_expired_token_is_rejected_then_unknown() {
    let f = fixture().await;
    let key = f.service.authenticate("alice", "wonderland").await.unwrap();

    // Thirty-one days later.
    f.tokens
        .set_expiration(&key, Some(Utc::now() - Duration::days(1)))
        .await;

    let first = f.service.current_user(Some(&key)).await;
    assert!(matches!(
        first,
        Err(DomainError::Token(TokenError::TokenExpired))
    ));

    let retry = f.service.current_user(Some(&key)).await;
    assert!(matches!(
        retry,
        Err(DomainError::Token(TokenError::TokenNotFound))
    ));
}

#[tokio::test]
async fn test_login_after_expiry_gets_fresh_key() {
    let f = fixture().await;
    let old_key = f.service.authenticate("alice", "wonderland").await.unwrap();
    f.tokens
        .set_expiration(&old_key, Some(Utc::now() - Duration::seconds(1)))
        .await;

    let new_key = f.service.authenticate("alice", "wonderland").await.unwrap();

    assert_ne!(old_key, new_key);
    assert_eq!(f.tokens.len().await, 1);
    assert!(f.tokens.find_by_key(&old_key).await.unwrap().is_none());
}

#[tokio::test]
async fn test_current_user_without_key() {
    let f = fixture().await;

    assert!(f.service.current_user(None).await.unwrap().is_none());
    assert!(f.service.current_user(Some("  ")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_current_user_whose_account_vanished() {
    let f = fixture().await;
    let key = f.service.authenticate("alice", "wonderland").await.unwrap();
    f.users.remove(f.alice.id).await;

    let result = f.service.current_user(Some(&key)).await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}

#[tokio::test]
async fn test_logout_without_key_mutates_nothing() {
    let f = fixture().await;
    f.service.authenticate("alice", "wonderland").await.unwrap();
    let before = f.tokens.all().await;

    let result = f.service.logout(None).await;

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::MissingToken))
    ));
    let after = f.tokens.all().await;
    assert_eq!(before.len(), after.len());
    assert_eq!(before[0].key, after[0].key);
}

#[tokio::test]
async fn test_logout_twice() {
    let f = fixture().await;
    let key = f.service.authenticate("alice", "wonderland").await.unwrap();

    f.service.logout(Some(&key)).await.unwrap();
    let second = f.service.logout(Some(&key)).await;

    assert!(matches!(
        second,
        Err(DomainError::Token(TokenError::TokenNotFound))
    ));
    assert!(f.tokens.find_by_user_id(f.alice.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_unknown_key_is_not_found() {
    let f = fixture().await;

    let result = f.service.current_user(Some(&Uuid::new_v4().to_string())).await;

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenNotFound))
    ));
}
