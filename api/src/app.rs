//! Application factory
//!
//! Builds the Actix-web application from already-constructed services, so
//! the binary and the integration tests share one routing table.

use actix_web::{middleware::Logger, web, App, HttpResponse};

use aipp_core::repositories::AdminRepository;
use aipp_core::services::otp::EmailServiceTrait;
use aipp_shared::config::CorsConfig;

use crate::dto::MessageResponse;
use crate::handlers::error::json_error_handler;
use crate::middleware::{auth::JwtAuth, cors::create_cors};
use crate::routes::auth::{send_otp::send_otp, session::session, verify_otp::verify_otp, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<A, E>(
    app_state: web::Data<AppState<A, E>>,
    cors_config: &CorsConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    A: AdminRepository + 'static,
    E: EmailServiceTrait + 'static,
{
    let jwt_auth = JwtAuth::new(app_state.token_service.clone());

    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(create_cors(cors_config))
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/auth")
                .route("/send-otp", web::post().to(send_otp::<A, E>))
                .route("/verify-otp", web::post().to(verify_otp::<A, E>))
                .service(
                    web::resource("/session")
                        .route(web::get().to(session))
                        .wrap(jwt_auth),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "aipp-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(MessageResponse::new(
        "The requested resource was not found",
    ))
}
