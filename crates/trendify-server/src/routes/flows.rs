//! Flow Routes - Catalogue listing and invocation

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

use trendify::{flows, MediaAttachment};

use crate::models::{ApiError, ErrorResponse, FlowSummary, InvokeFlowRequest, InvokeFlowResponse};
use crate::AppState;

/// List all flows
#[utoipa::path(
    get,
    path = "/trendify/flows",
    responses(
        (status = 200, description = "Flow catalogue", body = Vec<FlowSummary>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Flow"
)]
pub async fn list_flows() -> Json<Vec<FlowSummary>> {
    Json(flows::catalogue().iter().map(FlowSummary::from_domain).collect())
}

/// Run a flow
#[utoipa::path(
    post,
    path = "/trendify/flows/{flow}/invoke",
    params(
        ("flow" = String, Path, description = "Flow name (e.g. content_ideas)")
    ),
    request_body = InvokeFlowRequest,
    responses(
        (status = 200, description = "Validated flow output", body = InvokeFlowResponse),
        (status = 400, description = "Template error or bad attachment", body = ErrorResponse),
        (status = 404, description = "Unknown flow", body = ErrorResponse),
        (status = 502, description = "Provider, extraction or schema failure", body = ErrorResponse),
        (status = 503, description = "No AI provider configured", body = ErrorResponse)
    ),
    tag = "Flow"
)]
pub async fn invoke_flow(
    State(state): State<AppState>,
    Path(flow): Path<String>,
    Json(payload): Json<InvokeFlowRequest>,
) -> Result<Json<InvokeFlowResponse>, ApiError> {
    let attachments = match payload.attachment {
        Some(attachment) => {
            let data = STANDARD
                .decode(attachment.data_base64.trim())
                .map_err(|e| ApiError::bad_request(format!("Attachment is not valid base64: {e}")))?;
            vec![MediaAttachment::new(attachment.mime_type, data)]
        }
        None => Vec::new(),
    };

    tracing::info!("🎬 Running flow {}", flow);

    let outcome = state
        .generation_service
        .generate(&flow, payload.user_id.as_deref(), payload.input, attachments)
        .await?;

    Ok(Json(InvokeFlowResponse::from_outcome(outcome)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/trendify/flows", get(list_flows))
        .route("/trendify/flows/:flow/invoke", post(invoke_flow))
}
