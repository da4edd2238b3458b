//! Flow DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use trendify::{Flow, InvocationInput};

use crate::application::GenerationOutcome;

/// Catalogue entry
#[derive(Debug, Serialize, ToSchema)]
pub struct FlowSummary {
    pub name: String,
    pub description: String,
    /// Top-level input fields referenced by the prompt
    pub placeholders: Vec<String>,
    pub requires_attachment: bool,
    /// Provider tried first ("google" or "openai")
    pub provider: String,
}

impl FlowSummary {
    pub fn from_domain(flow: &Flow) -> Self {
        Self {
            name: flow.name.to_string(),
            description: flow.description.to_string(),
            placeholders: flow.template.placeholders(),
            requires_attachment: flow.requires_attachment,
            provider: flow.provider.to_string(),
        }
    }
}

/// Media sent with an invocation
#[derive(Debug, Deserialize, ToSchema)]
pub struct AttachmentPayload {
    /// MIME type (e.g. "video/mp4", "image/png")
    pub mime_type: String,
    /// Base64-encoded bytes
    pub data_base64: String,
}

/// Request to run a flow
#[derive(Debug, Deserialize, ToSchema)]
pub struct InvokeFlowRequest {
    /// When set, the result is saved to this user's history
    pub user_id: Option<String>,
    /// Placeholder values for the flow's prompt
    #[serde(default)]
    #[schema(value_type = Object)]
    pub input: InvocationInput,
    pub attachment: Option<AttachmentPayload>,
}

/// Result of a flow run
#[derive(Debug, Serialize, ToSchema)]
pub struct InvokeFlowResponse {
    pub flow: String,
    /// Output conforming to the flow's schema
    #[schema(value_type = Object)]
    pub output: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    pub provider: String,
    pub model: String,
}

impl InvokeFlowResponse {
    pub fn from_outcome(outcome: GenerationOutcome) -> Self {
        Self {
            flow: outcome.flow,
            output: outcome.output,
            record_id: outcome.record_id,
            provider: outcome.provider.to_string(),
            model: outcome.model,
        }
    }
}
