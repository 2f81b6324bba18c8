//! Mock Email Service Implementation
//!
//! Records messages in memory and logs them instead of sending them.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use aipp_shared::email::mask_email;

use super::email_service::EmailService;
use crate::InfrastructureError;

/// A message captured by [`MockEmailService`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub message_id: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mock email service for development and testing
///
/// Clones share the same outbox, so a test can keep one handle while the
/// application owns another.
#[derive(Clone, Default)]
pub struct MockEmailService {
    outbox: Arc<Mutex<Vec<SentEmail>>>,
    simulate_failure: Arc<AtomicBool>,
}

impl MockEmailService {
    /// Create a new mock email service
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that fails every delivery
    pub fn failing() -> Self {
        let service = Self::new();
        service.set_simulate_failure(true);
        service
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Messages delivered so far
    pub fn sent_messages(&self) -> Vec<SentEmail> {
        self.outbox.lock().map(|o| o.clone()).unwrap_or_default()
    }

    /// Most recent message delivered to `to`
    pub fn last_message_to(&self, to: &str) -> Option<SentEmail> {
        self.sent_messages().into_iter().rev().find(|m| m.to == to)
    }

    /// Number of messages delivered
    pub fn message_count(&self) -> usize {
        self.outbox.lock().map(|o| o.len()).unwrap_or(0)
    }
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(
                to = %mask_email(to),
                "Mock email service simulating failure"
            );
            return Err(InfrastructureError::Email(
                "Simulated email sending failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());

        let mut outbox = self
            .outbox
            .lock()
            .map_err(|_| InfrastructureError::Email("Mock outbox poisoned".to_string()))?;
        outbox.push(SentEmail {
            message_id: message_id.clone(),
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });

        info!(
            target: "email_service",
            provider = "mock",
            to = %mask_email(to),
            message_id = %message_id,
            count = outbox.len(),
            "Mock email recorded"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
