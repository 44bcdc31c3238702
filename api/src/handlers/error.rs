use std::fmt;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tg_core::errors::{AuthError, DomainError, TokenError};
use tg_shared::errors::error_codes;

use crate::dto::{ErrorResponse, ErrorResponseExt};

/// HTTP status, stable error code and client-facing message for a domain error
///
/// Internal details never reach the client; they are logged instead.
pub fn error_parts(error: &DomainError) -> (StatusCode, &'static str, String) {
    match error {
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::UserNotFound => (
                StatusCode::NOT_FOUND,
                error_codes::USER_NOT_FOUND,
                "User not found".to_string(),
            ),
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                error_codes::INVALID_CREDENTIALS,
                "Invalid password".to_string(),
            ),
            AuthError::CredentialCheckUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                error_codes::SERVICE_UNAVAILABLE,
                "Credential check is temporarily unavailable".to_string(),
            ),
        },
        DomainError::Token(token_error) => match token_error {
            TokenError::TokenNotFound => (
                StatusCode::NOT_FOUND,
                error_codes::TOKEN_NOT_FOUND,
                "Token not found".to_string(),
            ),
            TokenError::TokenExpired => (
                StatusCode::BAD_REQUEST,
                error_codes::TOKEN_EXPIRED,
                "Token expired".to_string(),
            ),
            TokenError::MissingToken => (
                StatusCode::BAD_REQUEST,
                error_codes::MISSING_TOKEN,
                "Token not provided".to_string(),
            ),
        },
        DomainError::Validation { message } => (
            StatusCode::BAD_REQUEST,
            error_codes::VALIDATION_ERROR,
            message.clone(),
        ),
        DomainError::NotFound { resource } => (
            StatusCode::NOT_FOUND,
            error_codes::NOT_FOUND,
            format!("{} not found", resource),
        ),
        DomainError::Unauthorized => (
            StatusCode::UNAUTHORIZED,
            error_codes::UNAUTHORIZED,
            "Authentication required".to_string(),
        ),
        DomainError::Conflict { .. } => (
            StatusCode::CONFLICT,
            error_codes::CONFLICT,
            "The request conflicted with a concurrent update, please retry".to_string(),
        ),
        DomainError::Internal { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            "An internal error occurred".to_string(),
        ),
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let (status, code, message) = error_parts(error);

    if status.is_server_error() {
        tracing::error!(error = %error, "Request failed");
    } else {
        tracing::debug!(error = %error, "Request rejected");
    }

    ErrorResponse::new(code, message).to_response(status)
}

/// Build a 400 response listing the request fields that failed validation
pub fn validation_error_response(errors: &validator::ValidationErrors) -> HttpResponse {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();
    fields.sort();

    ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request body")
        .add_detail("fields", fields)
        .to_response(StatusCode::BAD_REQUEST)
}

/// Domain error wrapper usable where actix expects an `actix_web::Error`
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self(error)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        error_parts(&self.0).0
    }

    fn error_response(&self) -> HttpResponse {
        handle_domain_error(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (DomainError::from(AuthError::UserNotFound), StatusCode::NOT_FOUND),
            (DomainError::from(AuthError::InvalidCredentials), StatusCode::UNAUTHORIZED),
            (
                DomainError::from(AuthError::CredentialCheckUnavailable),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (DomainError::from(TokenError::TokenNotFound), StatusCode::NOT_FOUND),
            (DomainError::from(TokenError::TokenExpired), StatusCode::BAD_REQUEST),
            (DomainError::from(TokenError::MissingToken), StatusCode::BAD_REQUEST),
            (DomainError::Unauthorized, StatusCode::UNAUTHORIZED),
            (
                DomainError::Conflict { message: "race".to_string() },
                StatusCode::CONFLICT,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status_code(), status);
        }
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let error = DomainError::Internal {
            message: "connection refused at 10.0.0.3".to_string(),
        };

        let (status, code, message) = error_parts(&error);

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, error_codes::INTERNAL_ERROR);
        assert!(!message.contains("10.0.0.3"));
    }
}
