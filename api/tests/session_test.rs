//! Integration tests for the JWT-protected session endpoint and app-level routes

mod common;

use actix_web::{
    body::{to_bytes, MessageBody},
    dev::ServiceResponse,
    http::{header::AUTHORIZATION, StatusCode},
    test, Error,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};

use aipp_api::app::create_app;
use aipp_api::dto::{SessionResponse, VerifyOtpResponse};
use aipp_core::repositories::AdminRepository;
use aipp_core::services::{TokenService, TokenServiceConfig};
use aipp_shared::config::CorsConfig;

use common::{TestContext, ADMIN_EMAIL, JWT_SECRET};

/// Status and JSON body of a call that may be rejected by middleware
async fn into_status_and_json<B>(result: Result<ServiceResponse<B>, Error>) -> (StatusCode, Value)
where
    B: MessageBody,
{
    match result {
        Ok(resp) => {
            let status = resp.status();
            let bytes = to_bytes(resp.into_body()).await.unwrap_or_default();
            (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
        }
        Err(err) => {
            let resp = err.error_response();
            let status = resp.status();
            let bytes = to_bytes(resp.into_body()).await.unwrap_or_default();
            (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
        }
    }
}

#[actix_web::test]
async fn test_session_with_token_from_login() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &CorsConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/send-otp")
        .set_json(json!({ "email": ADMIN_EMAIL }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/auth/verify-otp")
        .set_json(json!({ "email": ADMIN_EMAIL, "otp": ctx.emailed_code().unwrap() }))
        .to_request();
    let login: VerifyOtpResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/api/auth/session")
        .insert_header((AUTHORIZATION, format!("Bearer {}", login.token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let session: SessionResponse = test::read_body_json(resp).await;
    let admin = ctx
        .repository
        .find_by_email(ADMIN_EMAIL)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.admin_id, admin.id);
    assert!(session.expires_at > Utc::now() + Duration::minutes(59));
}

#[actix_web::test]
async fn test_session_without_token() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &CorsConfig::default())).await;

    let req = test::TestRequest::get().uri("/api/auth/session").to_request();
    let (status, body) = into_status_and_json(test::try_call_service(&app, req).await).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Missing or invalid Authorization header");
}

#[actix_web::test]
async fn test_session_with_garbage_token() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &CorsConfig::default())).await;

    let req = test::TestRequest::get()
        .uri("/api/auth/session")
        .insert_header((AUTHORIZATION, "Bearer not.a.jwt"))
        .to_request();
    let (status, body) = into_status_and_json(test::try_call_service(&app, req).await).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid or expired session token");
}

#[actix_web::test]
async fn test_session_with_token_signed_by_other_secret() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &CorsConfig::default())).await;

    let admin = ctx
        .repository
        .find_by_email(ADMIN_EMAIL)
        .await
        .unwrap()
        .unwrap();
    let foreign = TokenService::new(TokenServiceConfig {
        jwt_secret: format!("{}-other", JWT_SECRET),
        ..TokenServiceConfig::default()
    });
    let credential = foreign.issue(admin.id).unwrap();

    let req = test::TestRequest::get()
        .uri("/api/auth/session")
        .insert_header((AUTHORIZATION, format!("Bearer {}", credential.token)))
        .to_request();
    let (status, _) = into_status_and_json(test::try_call_service(&app, req).await).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_session_with_expired_token() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &CorsConfig::default())).await;

    let admin = ctx
        .repository
        .find_by_email(ADMIN_EMAIL)
        .await
        .unwrap()
        .unwrap();
    let credential = ctx
        .token_service
        .issue_at(admin.id, Utc::now() - Duration::hours(2))
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/api/auth/session")
        .insert_header((AUTHORIZATION, format!("Bearer {}", credential.token)))
        .to_request();
    let (status, _) = into_status_and_json(test::try_call_service(&app, req).await).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_health_check() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &CorsConfig::default())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_unknown_route() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &CorsConfig::default())).await;

    let req = test::TestRequest::get().uri("/api/auth/nothing-here").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
