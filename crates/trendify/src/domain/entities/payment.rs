//! PaymentEvent - A verified billing webhook from a payment gateway
//!
//! Only the fields needed to find the event later are lifted out of the
//! payload; the gateway's body is kept verbatim.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::PaymentGateway;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentEvent {
    pub id: Uuid,
    pub gateway: PaymentGateway,
    pub event_type: String,
    pub external_id: Option<String>,
    pub customer_ref: Option<String>,
    pub payload: serde_json::Value,
    pub received_at: DateTime<Utc>,
}

impl PaymentEvent {
    /// Document collection holding payment events
    pub const COLLECTION: &'static str = "payment_events";

    pub fn new(gateway: PaymentGateway, payload: serde_json::Value) -> Self {
        let event_type = first_str(&payload, &["/event", "/type"])
            .unwrap_or_else(|| "unknown".to_string());
        let external_id = first_str(&payload, &["/payment/id", "/data/id", "/id"]);
        let customer_ref = first_str(
            &payload,
            &["/payment/customer", "/data/customer/id", "/data/customerId"],
        );

        Self {
            id: Uuid::new_v4(),
            gateway,
            event_type,
            external_id,
            customer_ref,
            payload,
            received_at: Utc::now(),
        }
    }
}

fn first_str(payload: &serde_json::Value, pointers: &[&str]) -> Option<String> {
    pointers
        .iter()
        .filter_map(|p| payload.pointer(p))
        .find_map(|v| v.as_str())
        .map(|s| s.to_string())
}
