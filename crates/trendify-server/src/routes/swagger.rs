//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    // Flow models
    AttachmentPayload,
    // Error models
    ErrorResponse,
    FlowSummary,
    // Generation models
    GenerationResponse,
    InvokeFlowRequest,
    InvokeFlowResponse,
    ViolationResponse,
    // Webhook models
    WebhookAck,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Flow endpoints
        super::flows::list_flows,
        super::flows::invoke_flow,
        // Generation endpoints
        super::generations::list_generations,
        // Billing endpoints
        super::webhooks::receive_webhook,
    ),
    info(
        title = "Trendify API",
        version = "0.1.0",
        description = "AI content tools for creators: ideas, scripts, profile and video analysis.\n\nEvery AI answer is validated against the flow's output schema before it is returned.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Flow", description = "Flow - Prompt + schema bundles run against an AI provider"),
        (name = "Generation", description = "Generation - Saved results per user"),
        (name = "Billing", description = "Billing - Payment gateway webhooks"),
    ),
    components(
        schemas(
            // Flow
            FlowSummary,
            AttachmentPayload,
            InvokeFlowRequest,
            InvokeFlowResponse,
            // Generation
            GenerationResponse,
            // Billing
            WebhookAck,
            // Errors
            ErrorResponse,
            ViolationResponse,
        )
    ),
)]
pub struct ApiDoc;
