use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{LoginRequest, LoginResponse};
use crate::handlers::error::{handle_domain_error, validation_error_response};

use tg_core::repositories::{TokenRepository, UserRepository};
use tg_core::services::credentials::CredentialVerifier;

use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Authenticates with login and password and returns the user's token. An
/// existing valid token is returned unchanged.
///
/// # Request Body
///
/// ```json
/// {
///     "login": "alice",
///     "password": "secret"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "token": "hT9k...1718000000"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Invalid request body
/// - 401 Unauthorized: Wrong password
/// - 404 Not Found: Unknown login
/// - 409 Conflict: Concurrent login for the same user
/// - 503 Service Unavailable: Password check failed
pub async fn login<U, T, V>(
    state: web::Data<AppState<U, T, V>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    V: CredentialVerifier + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .auth_service
        .authenticate(&request.login, &request.password)
        .await
    {
        Ok(token) => HttpResponse::Ok().json(LoginResponse { token }),
        Err(error) => handle_domain_error(&error),
    }
}
