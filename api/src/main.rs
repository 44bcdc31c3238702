use std::sync::Arc;

use actix_web::{web, HttpServer};
use tracing::info;
use tracing_actix_web::TracingLogger;

use tg_api::{app::create_app, config, routes::auth::AppState, telemetry};
use tg_core::services::{
    AuthService, TokenCleanupConfig, TokenCleanupService, TokenService, TokenServiceConfig,
};
use tg_infra::{BcryptCredentialVerifier, DatabasePool, MySqlTokenRepository, MySqlUserRepository};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load();
    telemetry::init_tracing(&config.logging);

    info!(environment = %config.environment, "Starting Tollgate API Server");

    let database = DatabasePool::new(&config.database).await?;
    database.migrate().await?;

    let token_repository = Arc::new(MySqlTokenRepository::new(database.get_pool().clone()));
    let user_repository = Arc::new(MySqlUserRepository::new(database.get_pool().clone()));

    let token_service = Arc::new(TokenService::new(
        token_repository.clone(),
        TokenServiceConfig::from(&config.token),
    ));
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        token_service,
        Arc::new(BcryptCredentialVerifier::new()),
    ));

    let cleanup_service = Arc::new(TokenCleanupService::new(
        token_repository,
        TokenCleanupConfig::from(&config.cleanup),
    ));
    let cleanup_task = cleanup_service.start_background_task();

    let app_state = web::Data::new(
        AppState::new(auth_service, config.token.header_name.clone())
            .with_database(database.clone()),
    );

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || {
        create_app(app_state.clone()).wrap(TracingLogger::default())
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    if let Some(task) = cleanup_task {
        task.abort();
    }
    database.close().await;

    info!("Server stopped");
    Ok(())
}
