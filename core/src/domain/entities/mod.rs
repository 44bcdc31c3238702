//! Domain entities representing core business objects.

pub mod token;
pub mod user;

// Re-export commonly used types
pub use token::{AuthToken, TokenIssue, DEFAULT_TOKEN_LIFETIME_DAYS};
pub use user::User;
