//! Application factory
//!
//! Builds the Actix-web application from an already wired `AppState`.

use std::sync::Arc;

use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
    web, App, HttpRequest, HttpResponse,
};
use tg_shared::errors::error_codes;

use crate::dto::{ErrorResponse, ErrorResponseExt};
use crate::middleware::auth::{SessionResolver, TokenAuth};
use crate::routes::auth::{login::login, logout::logout, me::me, AppState};

use tg_core::repositories::{TokenRepository, UserRepository};
use tg_core::services::credentials::CredentialVerifier;

/// Create and configure the application with all dependencies
pub fn create_app<U, T, V>(
    app_state: web::Data<AppState<U, T, V>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    V: CredentialVerifier + 'static,
{
    let resolver: Arc<dyn SessionResolver> = app_state.auth_service.clone();
    let token_auth = TokenAuth::new(&app_state.token_header);

    App::new()
        // Add application state
        .app_data(app_state)
        .app_data(web::Data::new(resolver))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        // Health check endpoint
        .route("/health", web::get().to(health_check::<U, T, V>))
        // API v1 routes
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/login", web::post().to(login::<U, T, V>))
                    .route("/logout", web::post().to(logout::<U, T, V>))
                    .service(web::resource("/me").route(web::get().to(me)).wrap(token_auth)),
            ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
///
/// Reports 503 when the database does not answer.
async fn health_check<U, T, V>(state: web::Data<AppState<U, T, V>>) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    V: CredentialVerifier + 'static,
{
    let database_healthy = match &state.database {
        Some(pool) => pool.health_check().await.unwrap_or(false),
        None => true,
    };

    let body = serde_json::json!({
        "status": if database_healthy { "healthy" } else { "unhealthy" },
        "service": "tollgate-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    if database_healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    )
    .to_response(StatusCode::NOT_FOUND)
}

/// Malformed JSON bodies get the same error shape as validation failures
fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Malformed request body")
        .add_detail("reason", error.to_string())
        .to_response(StatusCode::BAD_REQUEST);

    InternalError::from_response(error, response).into()
}
