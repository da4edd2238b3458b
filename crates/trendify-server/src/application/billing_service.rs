//! Billing Application Service (Use Case)
//!
//! Verifies payment gateway webhooks and records them as PaymentEvents.

use std::collections::HashMap;
use std::sync::Arc;

use trendify::{DocumentRepository, DomainError, PaymentEvent, PaymentGateway};

use crate::adapters::signature::{verify_payload, SignatureError};

#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    #[error("No webhook secret configured for {0}")]
    NotConfigured(PaymentGateway),

    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error("Webhook body is not valid JSON: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Repository(#[from] DomainError),
}

/// Application service for billing webhooks
pub struct BillingService<R: DocumentRepository + ?Sized> {
    repo: Arc<R>,
    secrets: HashMap<PaymentGateway, String>,
}

impl<R: DocumentRepository + ?Sized> BillingService<R> {
    pub fn new(repo: Arc<R>, secrets: HashMap<PaymentGateway, String>) -> Self {
        Self { repo, secrets }
    }

    /// Verify and record one webhook delivery
    pub async fn receive(
        &self,
        gateway: PaymentGateway,
        signature: Option<&str>,
        body: &[u8],
    ) -> Result<PaymentEvent, BillingError> {
        let secret = self
            .secrets
            .get(&gateway)
            .ok_or(BillingError::NotConfigured(gateway))?;

        verify_payload(secret, body, signature)?;

        let payload: serde_json::Value =
            serde_json::from_slice(body).map_err(|e| BillingError::InvalidBody(e.to_string()))?;

        let event = PaymentEvent::new(gateway, payload);
        let id = event.id.to_string();
        let document =
            serde_json::to_value(&event).map_err(|e| DomainError::Repository(e.to_string()))?;

        self.repo
            .put(
                PaymentEvent::COLLECTION,
                &id,
                event.customer_ref.as_deref(),
                &document,
            )
            .await?;

        tracing::info!(
            "💳 Recorded {} event {} ({})",
            gateway,
            event.event_type,
            id
        );

        Ok(event)
    }
}
