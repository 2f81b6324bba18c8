use actix_web::{web, HttpResponse};
use validator::Validate;

use aipp_core::repositories::AdminRepository;
use aipp_core::services::otp::EmailServiceTrait;
use aipp_shared::email::mask_email;

use crate::dto::{MessageResponse, VerifyOtpRequest, VerifyOtpResponse};
use crate::handlers::error::{handle_domain_error, INVALID_OR_EXPIRED, OTP_VERIFIED};

use super::AppState;

/// Handler for POST /api/auth/verify-otp
///
/// Exchanges a passcode for a session token valid for one hour.
///
/// # Request Body
///
/// ```json
/// { "email": "admin@example.org", "otp": "482913" }
/// ```
///
/// # Responses
///
/// * `200 {"message": "OTP verified!", "token": "<jwt>"}`
/// * `400 {"message": "Invalid or expired OTP"}` - For every rejection,
///   malformed input included
pub async fn verify_otp<A, E>(
    state: web::Data<AppState<A, E>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    A: AdminRepository + 'static,
    E: EmailServiceTrait + 'static,
{
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        log::warn!(
            "Validation failed for verify-otp request from {}: {}",
            mask_email(&request.email),
            errors
        );
        return HttpResponse::BadRequest().json(MessageResponse::new(INVALID_OR_EXPIRED));
    }

    match state
        .otp_service
        .verify_otp(&request.email, &request.otp)
        .await
    {
        Ok(result) => {
            log::info!(
                "Administrator {} logged in, session expires at {}",
                result.admin_id,
                result.session.expires_at
            );
            HttpResponse::Ok().json(VerifyOtpResponse {
                message: OTP_VERIFIED.to_string(),
                token: result.session.token,
            })
        }
        Err(error) => handle_domain_error(error),
    }
}
