//! Transactional email HTTP API implementation
//!
//! Sends one JSON POST per message with bearer authentication. A failed
//! request is reported to the caller as is; there is no retry loop.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

use aipp_shared::config::EmailConfig;
use aipp_shared::email::mask_email;

use super::email_service::EmailService;
use crate::InfrastructureError;

/// HTTP email provider configuration
#[derive(Debug, Clone)]
pub struct HttpEmailConfig {
    /// Endpoint receiving the POST
    pub api_url: String,
    /// Bearer token
    pub api_key: String,
    /// Sender address
    pub from_address: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl TryFrom<&EmailConfig> for HttpEmailConfig {
    type Error = InfrastructureError;

    fn try_from(config: &EmailConfig) -> Result<Self, Self::Error> {
        let api_url = config
            .api_url
            .clone()
            .ok_or_else(|| InfrastructureError::Config("EMAIL_API_URL not set".to_string()))?;
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| InfrastructureError::Config("EMAIL_API_KEY not set".to_string()))?;

        Ok(Self {
            api_url,
            api_key,
            from_address: config.from_address.clone(),
            request_timeout_secs: config.request_timeout_secs,
        })
    }
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    #[serde(alias = "message_id", alias = "MessageID")]
    id: Option<String>,
}

/// Email service backed by a transactional email HTTP API
pub struct HttpEmailService {
    client: reqwest::Client,
    config: HttpEmailConfig,
}

impl HttpEmailService {
    /// Create a new HTTP email service
    pub fn new(config: HttpEmailConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            "HTTP email service initialized with sender: {}",
            mask_email(&config.from_address)
        );

        Ok(Self { client, config })
    }
}

#[async_trait]
impl EmailService for HttpEmailService {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError> {
        let payload = SendEmailRequest {
            from: &self.config.from_address,
            to,
            subject,
            text: body,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(to = %mask_email(to), error = %e, "Email API request failed");
                InfrastructureError::Http(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!(
                to = %mask_email(to),
                status = %status,
                "Email API rejected message"
            );
            return Err(InfrastructureError::Email(format!(
                "Email API returned {}: {}",
                status, detail
            )));
        }

        let message_id = response
            .json::<SendEmailResponse>()
            .await
            .ok()
            .and_then(|r| r.id)
            .unwrap_or_else(|| format!("http_{}", uuid::Uuid::new_v4()));

        info!(
            target: "email_service",
            provider = "http",
            to = %mask_email(to),
            message_id = %message_id,
            "Email sent"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "HTTP"
    }
}
