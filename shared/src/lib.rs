//! Shared configuration and common types for the Tollgate server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The error response structure returned by every endpoint

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CleanupConfig, DatabaseConfig, Environment, LogFormat, LoggingConfig,
    ServerConfig, TokenConfig,
};
pub use errors::{error_codes, ErrorResponse};
