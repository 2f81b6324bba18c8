use actix_web::{
    error::{InternalError, JsonPayloadError},
    HttpRequest, HttpResponse,
};

use aipp_core::errors::{AuthError, DomainError};

use crate::dto::MessageResponse;

pub const OTP_SENT: &str = "OTP sent successfully!";
pub const NOT_REGISTERED: &str = "Only registered admin can login";
pub const DELIVERY_FAILED: &str = "Failed to send OTP";
pub const OTP_VERIFIED: &str = "OTP verified!";
pub const INVALID_OR_EXPIRED: &str = "Invalid or expired OTP";
pub const INVALID_EMAIL: &str = "A valid email is required";
pub const INVALID_BODY: &str = "Invalid request body";
pub const UNAUTHORIZED: &str = "Invalid or expired session token";
pub const INTERNAL_ERROR: &str = "An internal error occurred";

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::NotRegistered => {
                HttpResponse::BadRequest().json(MessageResponse::new(NOT_REGISTERED))
            }
            AuthError::DeliveryFailed => {
                HttpResponse::InternalServerError().json(MessageResponse::new(DELIVERY_FAILED))
            }
            AuthError::InvalidOrExpired => {
                HttpResponse::BadRequest().json(MessageResponse::new(INVALID_OR_EXPIRED))
            }
            AuthError::AlreadyRegistered => {
                HttpResponse::Conflict().json(MessageResponse::new(auth_error.to_string()))
            }
        },
        DomainError::Token(token_error) => {
            log::warn!("Token error: {}", token_error);
            HttpResponse::Unauthorized().json(MessageResponse::new(UNAUTHORIZED))
        }
        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(MessageResponse::new(message))
        }
        DomainError::NotFound { resource } => HttpResponse::NotFound()
            .json(MessageResponse::new(format!("{} not found", resource))),
        DomainError::Repository { .. } | DomainError::Internal { .. } => {
            log::error!("Domain Error: {:?}", error);
            HttpResponse::InternalServerError().json(MessageResponse::new(INTERNAL_ERROR))
        }
    }
}

/// Render JSON body errors as `{message}` instead of actix's plain text
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected JSON body on {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(MessageResponse::new(INVALID_BODY));
    InternalError::from_response(err, response).into()
}
