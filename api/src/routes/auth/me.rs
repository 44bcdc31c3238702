use actix_web::HttpResponse;

use crate::dto::auth::CurrentUserResponse;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/auth/me
///
/// Returns the owner of the presented token. Requires `TokenAuth`.
///
/// ## Errors
/// - 400 Bad Request: Token expired (and now deleted)
/// - 401 Unauthorized: No token in the header
/// - 404 Not Found: Unknown token
pub async fn me(auth: AuthContext) -> HttpResponse {
    tracing::debug!(user_id = %auth.user_id, "Serving current user");
    HttpResponse::Ok().json(CurrentUserResponse::from(auth.user))
}
