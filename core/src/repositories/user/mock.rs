//! In-memory implementation of UserRepository for tests and local runs

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::trait_::UserRepository;

/// Mock user repository
#[derive(Clone)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Add a user, rejecting duplicate logins
    pub async fn insert(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.login == user.login) {
            return Err(DomainError::Conflict {
                message: format!("Login '{}' already exists", user.login),
            });
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Remove a user
    pub async fn remove(&self, id: Uuid) -> bool {
        self.users.write().await.remove(&id).is_some()
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.login == login && u.is_active)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_by_login_is_case_sensitive() {
        let repo = MockUserRepository::new();
        repo.insert(User::new("alice", "hash")).await.unwrap();

        assert!(repo.find_by_login("alice").await.unwrap().is_some());
        assert!(repo.find_by_login("Alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_inactive_users_are_hidden_from_login() {
        let repo = MockUserRepository::new();
        let mut user = User::new("bob", "hash");
        user.deactivate();
        let user = repo.insert(user).await.unwrap();

        assert!(repo.find_by_login("bob").await.unwrap().is_none());
        assert!(repo.find_by_id(user.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_login() {
        let repo = MockUserRepository::new();
        repo.insert(User::new("carol", "hash")).await.unwrap();

        let result = repo.insert(User::new("carol", "other")).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }
}
