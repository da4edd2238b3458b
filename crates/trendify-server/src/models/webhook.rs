//! Billing webhook DTOs

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use trendify::PaymentEvent;

/// Acknowledgement of a recorded payment event
#[derive(Debug, Serialize, ToSchema)]
pub struct WebhookAck {
    pub id: Uuid,
    pub gateway: String,
    pub event_type: String,
}

impl WebhookAck {
    pub fn from_domain(event: &PaymentEvent) -> Self {
        Self {
            id: event.id,
            gateway: event.gateway.to_string(),
            event_type: event.event_type.clone(),
        }
    }
}
