//! Shared fixtures for the API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use tg_api::routes::auth::AppState;
use tg_core::domain::entities::user::User;
use tg_core::repositories::{MockTokenRepository, MockUserRepository};
use tg_core::services::{AuthService, MockCredentialVerifier, TokenService, TokenServiceConfig};

pub type TestState = AppState<MockUserRepository, MockTokenRepository, MockCredentialVerifier>;

pub const TOKEN_HEADER: &str = "Authorization";

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub users: Arc<MockUserRepository>,
    pub tokens: Arc<MockTokenRepository>,
    pub verifier: Arc<MockCredentialVerifier>,
    pub token_service: Arc<TokenService<MockTokenRepository>>,
    pub alice: User,
}

/// Wires the app state on top of the in-memory repositories with one user,
/// `alice`, whose password is `wonderland`
pub async fn setup() -> TestContext {
    setup_with_header(TOKEN_HEADER).await
}

pub async fn setup_with_header(header: &str) -> TestContext {
    let users = Arc::new(MockUserRepository::new());
    let tokens = Arc::new(MockTokenRepository::new());
    let verifier = Arc::new(MockCredentialVerifier::new());

    let alice = users
        .insert(User::new("alice", "wonderland").with_name("Alice Liddell"))
        .await
        .unwrap();

    let token_service = Arc::new(TokenService::new(
        tokens.clone(),
        TokenServiceConfig::default(),
    ));
    let auth_service = Arc::new(AuthService::new(
        users.clone(),
        token_service.clone(),
        verifier.clone(),
    ));

    TestContext {
        state: web::Data::new(AppState::new(auth_service, header)),
        users,
        tokens,
        verifier,
        token_service,
        alice,
    }
}
