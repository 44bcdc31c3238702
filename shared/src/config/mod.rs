//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Token lifetime, key shape, header name and background cleanup
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

pub use auth::{CleanupConfig, TokenConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Token configuration
    pub token: TokenConfig,

    /// Background token cleanup configuration
    #[serde(default)]
    pub cleanup: CleanupConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            token: TokenConfig::default(),
            cleanup: CleanupConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Logging defaults follow the detected environment; `LOG_LEVEL` and
    /// `LOG_FORMAT` override them.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();

        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            token: TokenConfig::from_env(),
            cleanup: CleanupConfig::from_env(),
            logging: LoggingConfig::for_environment(environment).with_env_overrides(),
        }
    }
}

/// Read and parse an environment variable, falling back to `default` when it
/// is unset or does not parse
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
