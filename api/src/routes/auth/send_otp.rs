use actix_web::{web, HttpResponse};
use validator::Validate;

use aipp_core::repositories::AdminRepository;
use aipp_core::services::otp::EmailServiceTrait;
use aipp_shared::email::mask_email;

use crate::dto::{MessageResponse, SendOtpRequest};
use crate::handlers::error::{handle_domain_error, INVALID_EMAIL, OTP_SENT};

use super::AppState;

/// Handler for POST /api/auth/send-otp
///
/// Sends a one-time passcode to a registered administrator.
///
/// # Request Body
///
/// ```json
/// { "email": "admin@example.org" }
/// ```
///
/// # Responses
///
/// * `200 {"message": "OTP sent successfully!"}`
/// * `400 {"message": "Only registered admin can login"}` - Unknown email
/// * `400 {"message": "A valid email is required"}` - Malformed email
/// * `500 {"message": "Failed to send OTP"}` - Code stored but email not sent
pub async fn send_otp<A, E>(
    state: web::Data<AppState<A, E>>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse
where
    A: AdminRepository + 'static,
    E: EmailServiceTrait + 'static,
{
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        log::warn!(
            "Validation failed for send-otp request from {}: {}",
            mask_email(&request.email),
            errors
        );
        return HttpResponse::BadRequest().json(MessageResponse::new(INVALID_EMAIL));
    }

    match state.otp_service.request_otp(&request.email).await {
        Ok(result) => {
            log::info!(
                "OTP sent to {}, message_id: {}",
                mask_email(&request.email),
                result.message_id
            );
            HttpResponse::Ok().json(MessageResponse::new(OTP_SENT))
        }
        Err(error) => {
            log::warn!(
                "send-otp failed for {}: {}",
                mask_email(&request.email),
                error
            );
            handle_domain_error(error)
        }
    }
}
