//! Configuration for the token service

use jsonwebtoken::Algorithm;

use aipp_shared::config::{JwtConfig, DEFAULT_JWT_SECRET};

use crate::domain::entities::token::{DEFAULT_JWT_ISSUER, SESSION_TOKEN_EXPIRY_SECONDS};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Session token lifetime in seconds
    pub session_expiry_seconds: i64,
    /// Issuer written into and required from every token
    pub issuer: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            algorithm: Algorithm::HS256,
            session_expiry_seconds: SESSION_TOKEN_EXPIRY_SECONDS,
            issuer: DEFAULT_JWT_ISSUER.to_string(),
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            algorithm: Algorithm::HS256,
            session_expiry_seconds: config.expiry_seconds,
            issuer: config.issuer.clone(),
        }
    }
}
