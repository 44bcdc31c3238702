//! # Tollgate Core
//!
//! Core business logic and domain layer for the Tollgate token
//! authentication service. This crate contains domain entities, business
//! services, repository interfaces and error types. It has no knowledge of
//! HTTP or of the database engine.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{AuthToken, TokenIssue, User, DEFAULT_TOKEN_LIFETIME_DAYS};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{MockTokenRepository, MockUserRepository, TokenRepository, UserRepository};
pub use services::{
    AuthService, CleanupResult, CredentialVerifier, MockCredentialVerifier, TokenCleanupConfig,
    TokenCleanupService, TokenService, TokenServiceConfig,
};
