//! Business services containing domain logic and use cases.

pub mod auth;
pub mod credentials;
pub mod token;

// Re-export commonly used types
pub use auth::AuthService;
pub use credentials::{CredentialVerifier, MockCredentialVerifier};
pub use token::{
    generate_token_key, mask_key, CleanupResult, TokenCleanupConfig, TokenCleanupService,
    TokenService, TokenServiceConfig,
};
