//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for Tollgate. It provides
//! concrete implementations of the repository and credential traits defined
//! in `tg_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL connection pool, migrations and repositories using SQLx
//! - **Credentials**: bcrypt password verification

// Re-export core error types for convenience
pub use tg_core::errors::{DomainError, DomainResult};

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Credentials module - password verification
pub mod credentials;

pub use credentials::BcryptCredentialVerifier;
pub use database::{DatabasePool, MySqlTokenRepository, MySqlUserRepository, PoolStatistics};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
