use std::sync::Arc;

use actix_web::{web, HttpServer};
use log::info;

use aipp_api::{app::create_app, config::load_config, routes::auth::AppState};
use aipp_core::services::{
    AdminDirectory, OtpService, OtpServiceConfig, TokenService, TokenServiceConfig,
};
use aipp_infra::database::{DatabasePool, MySqlAdminRepository};
use aipp_infra::email::{create_email_service, EmailServiceAdapter};
use aipp_shared::email::mask_email;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;

    env_logger::init_from_env(env_logger::Env::new().default_filter_or(&config.logging.level));

    info!("Starting AIPP API Server ({})", config.environment);

    let pool = DatabasePool::connect(config.database.clone()).await?;
    pool.migrate().await?;

    let repository = Arc::new(MySqlAdminRepository::new(pool.pool().clone()));
    let directory = AdminDirectory::new(repository);

    if let Some((email, password)) = config.bootstrap.credentials() {
        let admin = directory.ensure_registered(email, password).await?;
        info!("Bootstrap administrator ready: {}", mask_email(&admin.email));
    }

    let email_service = EmailServiceAdapter::new(create_email_service(&config.email)?);
    info!("Email provider: {}", email_service.provider_name());

    let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(&config.jwt)));
    let otp_service = Arc::new(OtpService::new(
        directory,
        Arc::new(email_service),
        Arc::clone(&token_service),
        OtpServiceConfig::from(&config.otp),
    ));

    let app_state = web::Data::new(AppState::new(otp_service, token_service));
    let cors_config = config.cors.clone();

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone(), &cors_config));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server.bind(&bind_address)?.run().await?;

    pool.close().await;
    Ok(())
}
