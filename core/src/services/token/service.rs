//! Main token service implementation

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::domain::value_objects::SessionCredential;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Signs and verifies administrator session tokens
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Service configuration
    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Issues a session credential for an administrator starting now
    pub fn issue(&self, admin_id: Uuid) -> Result<SessionCredential, DomainError> {
        self.issue_at(admin_id, Utc::now())
    }

    /// Issues a session credential whose lifetime starts at `now`
    ///
    /// # Returns
    ///
    /// * `Ok(SessionCredential)` - Token valid for the configured lifetime
    /// * `Err(TokenError::TokenGenerationFailed)` - Signing failed
    pub fn issue_at(
        &self,
        admin_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<SessionCredential, DomainError> {
        let claims = Claims::new_session(
            admin_id,
            &self.config.issuer,
            now,
            Duration::seconds(self.config.session_expiry_seconds),
        );
        let token = self.encode_jwt(&claims)?;

        Ok(SessionCredential {
            token,
            admin_id,
            expires_at: claims.expires_at(),
        })
    }

    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies a session token and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature, issuer and expiry are valid
    /// * `Err(TokenError::TokenExpired)` - Token is past `exp`
    /// * `Err(TokenError::InvalidToken)` - Anything else wrong with the token
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => DomainError::Token(TokenError::TokenExpired),
                _ => DomainError::Token(TokenError::InvalidToken),
            })?;

        let claims = token_data.claims;
        if claims.admin_id().is_err() {
            return Err(DomainError::Token(TokenError::InvalidClaim {
                claim: "sub".to_string(),
            }));
        }

        Ok(claims)
    }
}
