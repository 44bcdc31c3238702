//! MySQL implementations of the core repository traits

mod token_repository_impl;
mod user_repository_impl;

pub use token_repository_impl::MySqlTokenRepository;
pub use user_repository_impl::MySqlUserRepository;

use tg_core::errors::DomainError;

/// Translate a SQLx error into the domain taxonomy
///
/// Unique-key violations become `Conflict` so a lost insert race reaches the
/// caller as such. Everything else is internal.
pub(crate) fn map_sqlx_error(context: &str, error: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_error) = &error {
        if db_error.is_unique_violation() {
            return DomainError::Conflict {
                message: format!("{}: duplicate entry", context),
            };
        }
    }

    DomainError::Internal {
        message: format!("{}: {}", context, error),
    }
}

/// Parse a `CHAR(36)` column into a UUID
pub(crate) fn parse_uuid(column: &str, value: &str) -> Result<uuid::Uuid, DomainError> {
    uuid::Uuid::parse_str(value).map_err(|e| DomainError::Internal {
        message: format!("Invalid UUID in {}: {}", column, e),
    })
}
