//! Authentication route handlers
//!
//! This module contains all authentication-related endpoints:
//! - Login with password
//! - Logout
//! - Current user lookup

pub mod login;
pub mod logout;
pub mod me;

use std::sync::Arc;

use tg_core::repositories::{TokenRepository, UserRepository};
use tg_core::services::{credentials::CredentialVerifier, AuthService};
use tg_infra::DatabasePool;

/// Application state that holds shared services
pub struct AppState<U, T, V>
where
    U: UserRepository,
    T: TokenRepository,
    V: CredentialVerifier,
{
    pub auth_service: Arc<AuthService<U, T, V>>,
    /// Request header carrying the raw token key
    pub token_header: String,
    /// Connection pool checked by the health check, absent in tests
    pub database: Option<DatabasePool>,
}

impl<U, T, V> AppState<U, T, V>
where
    U: UserRepository,
    T: TokenRepository,
    V: CredentialVerifier,
{
    pub fn new(auth_service: Arc<AuthService<U, T, V>>, token_header: impl Into<String>) -> Self {
        Self {
            auth_service,
            token_header: token_header.into(),
            database: None,
        }
    }

    pub fn with_database(mut self, database: DatabasePool) -> Self {
        self.database = Some(database);
        self
    }
}
