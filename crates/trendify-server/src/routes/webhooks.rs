//! Billing Webhook Routes
//!
//! Public endpoints authenticated by the gateway's HMAC signature instead of
//! the service bearer token.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::HeaderMap,
    routing::post,
    Json, Router,
};

use trendify::PaymentGateway;

use crate::models::{ApiError, ErrorResponse, WebhookAck};
use crate::AppState;

/// Receive a payment gateway webhook
#[utoipa::path(
    post,
    path = "/trendify/webhooks/{gateway}",
    params(
        ("gateway" = String, Path, description = "Payment gateway: asaas or abacatepay")
    ),
    request_body(content = String, description = "Gateway event payload (JSON, signed)", content_type = "application/json"),
    responses(
        (status = 200, description = "Event recorded", body = WebhookAck),
        (status = 400, description = "Body is not JSON", body = ErrorResponse),
        (status = 401, description = "Missing or invalid signature", body = ErrorResponse),
        (status = 404, description = "Unknown gateway", body = ErrorResponse),
        (status = 503, description = "Gateway secret not configured", body = ErrorResponse)
    ),
    tag = "Billing"
)]
pub async fn receive_webhook(
    State(state): State<AppState>,
    Path(gateway): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, ApiError> {
    let gateway: PaymentGateway = gateway.parse().map_err(ApiError::not_found)?;

    let signature = headers
        .get(gateway.signature_header())
        .and_then(|v| v.to_str().ok());

    let event = state
        .billing_service
        .receive(gateway, signature, &body)
        .await
        .map_err(|e| {
            tracing::warn!("Rejected {} webhook: {}", gateway, e);
            ApiError::from(e)
        })?;

    Ok(Json(WebhookAck::from_domain(&event)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/trendify/webhooks/:gateway", post(receive_webhook))
}
