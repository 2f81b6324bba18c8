//! CORS middleware configuration for cross-origin requests.
//!
//! The admin front end is served from a different origin than the API, so
//! browsers need CORS headers on every auth endpoint.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use aipp_shared::config::CorsConfig;

/// Creates a CORS middleware instance from configuration.
///
/// `*` in the allowed origins accepts any origin (development default);
/// otherwise only the listed origins are accepted.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let cors = if config.allows_any_origin() {
        log::info!("Configuring CORS to allow any origin");
        Cors::default().allow_any_origin()
    } else {
        log::info!("Configuring CORS for origins: {:?}", config.allowed_origins);
        config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(vec![
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::PATCH,
        Method::OPTIONS,
    ])
    .allowed_headers(vec![
        header::AUTHORIZATION,
        header::ACCEPT,
        header::CONTENT_TYPE,
        header::ORIGIN,
        header::HeaderName::from_static("x-requested-with"),
    ])
    .max_age(config.max_age)
}
