use actix_web::{web, HttpRequest, HttpResponse};

use crate::dto::auth::LogoutResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::extract_token_key;

use tg_core::repositories::{TokenRepository, UserRepository};
use tg_core::services::credentials::CredentialVerifier;

use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Deletes the token presented in the token header.
///
/// # Headers
///
/// ```text
/// Authorization: {token}
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "User logout successfully"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: No token in the header
/// - 404 Not Found: Unknown token
pub async fn logout<U, T, V>(req: HttpRequest, state: web::Data<AppState<U, T, V>>) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    V: CredentialVerifier + 'static,
{
    let key = extract_token_key(req.headers(), &state.token_header);

    match state.auth_service.logout(key.as_deref()).await {
        Ok(()) => HttpResponse::Ok().json(LogoutResponse {
            message: "User logout successfully".to_string(),
        }),
        Err(error) => handle_domain_error(&error),
    }
}
