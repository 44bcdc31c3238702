//! Integration tests for the token lifecycle through the public crate API

use std::sync::Arc;

use chrono::{Duration, Utc};
use tg_core::{
    AuthService, DomainError, MockCredentialVerifier, MockTokenRepository, MockUserRepository,
    TokenError, TokenRepository, TokenService, TokenServiceConfig, User,
};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_logins_leave_one_token() {
    let tokens = Arc::new(MockTokenRepository::new());
    let service = Arc::new(TokenService::new(tokens.clone(), TokenServiceConfig::default()));
    let user_id = uuid::Uuid::new_v4();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.issue_or_renew(user_id).await })
        })
        .collect();

    let mut keys = Vec::new();
    for handle in handles {
        match handle.await.unwrap() {
            Ok(issue) => keys.push(issue.key),
            Err(DomainError::Conflict { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert!(!keys.is_empty());
    assert!(keys.iter().all(|k| k == &keys[0]));
    assert_eq!(tokens.len().await, 1);
}

#[tokio::test]
async fn test_alice_session_scenario() {
    let users = Arc::new(MockUserRepository::new());
    let tokens = Arc::new(MockTokenRepository::new());
    let alice = users.insert(User::new("alice", "wonderland")).await.unwrap();

    let token_service = Arc::new(TokenService::new(tokens.clone(), TokenServiceConfig::default()));
    let auth = AuthService::new(
        users,
        token_service.clone(),
        Arc::new(MockCredentialVerifier::new()),
    );

    let t1 = auth.authenticate("alice", "wonderland").await.unwrap();
    assert_eq!(
        token_service.resolve_key_to_user(Some(&t1)).await.unwrap(),
        Some(alice.id)
    );

    // Past the thirty-day lifetime.
    tokens
        .set_expiration(&t1, Some(Utc::now() - Duration::seconds(1)))
        .await;

    for expected in [TokenError::TokenExpired, TokenError::TokenNotFound] {
        match token_service.resolve_key_to_user(Some(&t1)).await {
            Err(DomainError::Token(e)) => assert_eq!(e, expected),
            other => panic!("unexpected result: {other:?}"),
        }
    }
    assert!(tokens.find_by_key(&t1).await.unwrap().is_none());
}
