//! Bearer-token guard for administrator-only routes.
//!
//! `JwtAuth` wraps a resource or scope. Requests without a valid session
//! token are answered with 401 `{message}` before reaching the handler; the
//! rest carry an [`AuthContext`] that handlers take as an extractor.

use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use chrono::{DateTime, Utc};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

use aipp_core::{
    domain::entities::token::Claims,
    errors::{DomainError, TokenError},
    services::token::TokenService,
};

use crate::dto::MessageResponse;
use crate::handlers::error::UNAUTHORIZED;

const MISSING_TOKEN: &str = "Missing or invalid Authorization header";

/// The authenticated administrator behind a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub admin_id: Uuid,
    /// Token id, useful for correlating log lines
    pub jti: String,
    pub expires_at: DateTime<Utc>,
}

impl AuthContext {
    pub fn from_claims(claims: Claims) -> Result<Self, DomainError> {
        let admin_id = claims.admin_id().map_err(|_| TokenError::InvalidClaim {
            claim: "sub".to_string(),
        })?;
        Ok(Self {
            admin_id,
            expires_at: claims.expires_at(),
            jti: claims.jti,
        })
    }
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        // Only present behind JwtAuth
        ready(
            req.extensions()
                .get::<AuthContext>()
                .cloned()
                .ok_or_else(|| unauthorized(UNAUTHORIZED)),
        )
    }
}

/// Middleware factory; see the module docs
#[derive(Clone)]
pub struct JwtAuth {
    token_service: Arc<TokenService>,
}

impl JwtAuth {
    pub fn new(token_service: Arc<TokenService>) -> Self {
        Self { token_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            token_service: Arc::clone(&self.token_service),
        }))
    }
}

pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    token_service: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let outcome = authenticate(&self.token_service, &req);
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let context = outcome?;
            req.extensions_mut().insert(context);
            service.call(req).await
        })
    }
}

/// Resolve the request's bearer token into an [`AuthContext`]
fn authenticate(token_service: &TokenService, req: &ServiceRequest) -> Result<AuthContext, Error> {
    let token = extract_bearer_token(req).ok_or_else(|| unauthorized(MISSING_TOKEN))?;

    token_service
        .verify(&token)
        .and_then(AuthContext::from_claims)
        .map_err(|e| {
            log::warn!("Rejected session token on {}: {}", req.path(), e);
            unauthorized(UNAUTHORIZED)
        })
}

fn unauthorized(message: &'static str) -> Error {
    InternalError::from_response(
        message,
        HttpResponse::Unauthorized().json(MessageResponse::new(message)),
    )
    .into()
}

fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use aipp_core::services::token::TokenServiceConfig;

    fn request_with(header: Option<&str>) -> ServiceRequest {
        let req = TestRequest::default();
        match header {
            Some(value) => req.insert_header((AUTHORIZATION, value)).to_srv_request(),
            None => req.to_srv_request(),
        }
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(
            extract_bearer_token(&request_with(Some("Bearer abc.def.ghi"))),
            Some("abc.def.ghi".to_string())
        );
        assert_eq!(extract_bearer_token(&request_with(Some("abc.def.ghi"))), None);
        assert_eq!(extract_bearer_token(&request_with(Some("Bearer   "))), None);
        assert_eq!(extract_bearer_token(&request_with(None)), None);
    }

    #[test]
    fn test_authenticate_accepts_issued_token() {
        let tokens = TokenService::new(TokenServiceConfig::default());
        let admin_id = Uuid::new_v4();
        let credential = tokens.issue(admin_id).unwrap();

        let header = format!("Bearer {}", credential.token);
        let context = authenticate(&tokens, &request_with(Some(&header))).unwrap();

        assert_eq!(context.admin_id, admin_id);
        assert_eq!(context.expires_at, credential.expires_at);
    }

    #[test]
    fn test_authenticate_rejects_missing_header() {
        let tokens = TokenService::new(TokenServiceConfig::default());
        let err = authenticate(&tokens, &request_with(None)).unwrap_err();

        assert_eq!(
            err.error_response().status(),
            actix_web::http::StatusCode::UNAUTHORIZED
        );
    }
}
