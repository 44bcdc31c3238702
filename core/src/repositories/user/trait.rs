//! User repository trait defining read access to the external user store.
//!
//! The token service never writes users; account management belongs to
//! whatever system owns the user table.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for looking up user accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find an active user by login
    ///
    /// Matching is exact and case-sensitive. Inactive users are not returned.
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No active user with this login
    /// * `Err(DomainError)` - Database or other error occurred
    ///
    /// # Example
    /// ```no_run
    /// # use tg_core::repositories::UserRepository;
    /// # async fn example(repo: &impl UserRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// match repo.find_by_login("alice").await? {
    ///     Some(user) => println!("User found: {}", user.id),
    ///     None => println!("User not found"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;
}
