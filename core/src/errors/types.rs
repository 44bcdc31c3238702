//! Authentication and token error types
//!
//! Each variant maps to a fixed HTTP status in the presentation layer.
//! None of them is retried internally.

use thiserror::Error;

/// Login failures
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("Invalid password")]
    InvalidCredentials,

    /// The credential verifier failed; the login is refused
    #[error("Credential verification unavailable")]
    CredentialCheckUnavailable,
}

/// Token lookup and revocation failures
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token not found")]
    TokenNotFound,

    /// Raised after the expired row has been deleted
    #[error("Token expired")]
    TokenExpired,

    #[error("Token not provided")]
    MissingToken,
}
