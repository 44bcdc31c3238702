//! Token service module for bearer-key sessions
//!
//! This module handles all token-related operations including:
//! - Key generation
//! - Issuing, renewing, resolving and revoking tokens
//! - Background cleanup of expired tokens

mod cleanup;
mod config;
mod key;
mod service;


pub use cleanup::{CleanupResult, TokenCleanupConfig, TokenCleanupService};
pub use config::TokenServiceConfig;
pub use key::{generate_token_key, mask_key};
pub use service::TokenService;
