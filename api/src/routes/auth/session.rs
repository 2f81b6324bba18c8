use actix_web::HttpResponse;

use crate::dto::SessionResponse;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/auth/session
///
/// Requires `JwtAuth`; echoes the administrator and expiry carried by the
/// bearer token.
pub async fn session(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(SessionResponse {
        admin_id: auth.admin_id,
        expires_at: auth.expires_at,
    })
}
