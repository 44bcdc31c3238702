//! Unit tests for the in-memory token repository

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::AuthToken;
use crate::errors::DomainError;
use crate::repositories::token::{MockTokenRepository, TokenRepository};

fn token_for(user_id: Uuid, key: &str) -> AuthToken {
    AuthToken::issue(user_id, key.to_string(), Duration::days(30))
}

#[tokio::test]
async fn test_create_and_find() {
    let repo = MockTokenRepository::new();
    let user_id = Uuid::new_v4();

    let saved = repo.create(token_for(user_id, "key-1")).await.unwrap();

    let by_user = repo.find_by_user_id(user_id).await.unwrap().unwrap();
    assert_eq!(by_user.id, saved.id);

    let by_key = repo.find_by_key("key-1").await.unwrap().unwrap();
    assert_eq!(by_key.user_id, user_id);

    assert!(repo.find_by_key("unknown").await.unwrap().is_none());
}

#[tokio::test]
async fn test_one_token_per_user() {
    let repo = MockTokenRepository::new();
    let user_id = Uuid::new_v4();

    repo.create(token_for(user_id, "key-1")).await.unwrap();
    let result = repo.create(token_for(user_id, "key-2")).await;

    assert!(matches!(result, Err(DomainError::Conflict { .. })));
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_key_is_unique() {
    let repo = MockTokenRepository::new();

    repo.create(token_for(Uuid::new_v4(), "shared")).await.unwrap();
    let result = repo.create(token_for(Uuid::new_v4(), "shared")).await;

    assert!(matches!(result, Err(DomainError::Conflict { .. })));
}

#[tokio::test]
async fn test_rotate_key_requires_previous_key() {
    let repo = MockTokenRepository::new();
    let saved = repo.create(token_for(Uuid::new_v4(), "old")).await.unwrap();
    let expiration = Utc::now() + Duration::days(30);

    assert!(!repo.rotate_key(saved.id, "stale", "new", expiration).await.unwrap());
    assert!(repo.rotate_key(saved.id, "old", "new", expiration).await.unwrap());

    let rotated = repo.find_by_key("new").await.unwrap().unwrap();
    assert_eq!(rotated.id, saved.id);
    assert_eq!(rotated.expiration_date, Some(expiration));
    assert!(repo.find_by_key("old").await.unwrap().is_none());
}

#[tokio::test]
async fn test_rotate_key_rejects_taken_key() {
    let repo = MockTokenRepository::new();
    let first = repo.create(token_for(Uuid::new_v4(), "first")).await.unwrap();
    repo.create(token_for(Uuid::new_v4(), "second")).await.unwrap();

    let result = repo
        .rotate_key(first.id, "first", "second", Utc::now() + Duration::days(30))
        .await;

    assert!(matches!(result, Err(DomainError::Conflict { .. })));
}

#[tokio::test]
async fn test_delete_by_key() {
    let repo = MockTokenRepository::new();
    repo.create(token_for(Uuid::new_v4(), "key")).await.unwrap();

    assert!(repo.delete_by_key("key").await.unwrap());
    assert!(!repo.delete_by_key("key").await.unwrap());
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_delete_without_expiration() {
    let repo = MockTokenRepository::new();
    let mut malformed = token_for(Uuid::new_v4(), "malformed");
    malformed.expiration_date = None;
    repo.insert_raw(malformed).await;
    repo.create(token_for(Uuid::new_v4(), "valid")).await.unwrap();

    assert_eq!(repo.delete_without_expiration().await.unwrap(), 1);
    assert!(repo.find_by_key("valid").await.unwrap().is_some());
    assert!(repo.find_by_key("malformed").await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_expired() {
    let repo = MockTokenRepository::new();
    repo.create(token_for(Uuid::new_v4(), "valid")).await.unwrap();
    repo.create(token_for(Uuid::new_v4(), "expired")).await.unwrap();
    repo.set_expiration("expired", Some(Utc::now() - Duration::hours(1))).await;

    assert_eq!(repo.delete_expired(Utc::now()).await.unwrap(), 1);
    assert_eq!(repo.len().await, 1);
    assert!(repo.find_by_key("valid").await.unwrap().is_some());
}
