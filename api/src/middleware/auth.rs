//! Token authentication middleware for protecting API endpoints.
//!
//! This middleware reads the raw token key from the configured request
//! header, resolves it to a user through the session resolver stored in app
//! data, and injects the user into the request extensions.

use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::HeaderMap,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use uuid::Uuid;

use tg_core::{
    domain::entities::user::User,
    errors::{DomainError, DomainResult},
    repositories::{TokenRepository, UserRepository},
    services::{credentials::CredentialVerifier, AuthService},
};

use crate::handlers::error::ApiError;

/// User authentication context injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Owner of the presented token
    pub user_id: Uuid,
    /// Full user record
    pub user: User,
}

impl AuthContext {
    pub fn new(user: User) -> Self {
        Self {
            user_id: user.id,
            user,
        }
    }
}

/// Trait for resolving a presented key to a user with dynamic dispatch
#[async_trait]
pub trait SessionResolver: Send + Sync {
    async fn resolve_session(&self, key: Option<&str>) -> DomainResult<Option<User>>;
}

#[async_trait]
impl<U, T, V> SessionResolver for AuthService<U, T, V>
where
    U: UserRepository,
    T: TokenRepository,
    V: CredentialVerifier,
{
    async fn resolve_session(&self, key: Option<&str>) -> DomainResult<Option<User>> {
        self.current_user(key).await
    }
}

/// Token authentication middleware factory
pub struct TokenAuth {
    /// Request header carrying the raw key
    header_name: Rc<str>,
}

impl TokenAuth {
    /// Creates a middleware reading the key from `header_name`
    pub fn new(header_name: impl AsRef<str>) -> Self {
        Self {
            header_name: Rc::from(header_name.as_ref()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for TokenAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = TokenAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TokenAuthMiddleware {
            service: Rc::new(service),
            header_name: Rc::clone(&self.header_name),
        }))
    }
}

/// Token authentication middleware service
pub struct TokenAuthMiddleware<S> {
    service: Rc<S>,
    header_name: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for TokenAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let header_name = Rc::clone(&self.header_name);

        Box::pin(async move {
            let Some(key) = extract_token_key(req.headers(), &header_name) else {
                return Ok(req.error_response(ApiError(DomainError::Unauthorized)));
            };

            let Some(resolver) = req
                .app_data::<web::Data<Arc<dyn SessionResolver>>>()
                .cloned()
            else {
                tracing::error!("Session resolver is not registered in app data");
                return Ok(req.error_response(ApiError(DomainError::Internal {
                    message: "Session resolver not configured".to_string(),
                })));
            };

            let user = match resolver.resolve_session(Some(&key)).await {
                Ok(Some(user)) => user,
                Ok(None) => return Ok(req.error_response(ApiError(DomainError::Unauthorized))),
                Err(e) => return Ok(req.error_response(ApiError(e))),
            };

            req.extensions_mut().insert(AuthContext::new(user));

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_boxed_body)
        })
    }
}

/// Reads the raw token key from `header_name`
///
/// The header holds the key itself, not a scheme-prefixed value. The one
/// change made to it is trimming surrounding whitespace. Issued keys are
/// alphanumeric, so a padded key can only match the key it pads. A blank
/// value counts as absent.
pub fn extract_token_key(headers: &HeaderMap, header_name: &str) -> Option<String> {
    headers
        .get(header_name)?
        .to_str()
        .ok()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result: Result<Self, Self::Error> = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError(DomainError::Unauthorized).into());

        ready(result)
    }
}
