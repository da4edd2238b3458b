//! Trendify API Client

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use trendify::InvocationInput;

/// API Client for Trendify
pub struct TrendifyClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

// ============================================
// API Types
// ============================================

#[derive(Debug, Deserialize)]
pub struct FlowSummary {
    pub name: String,
    pub description: String,
    pub placeholders: Vec<String>,
    pub requires_attachment: bool,
    pub provider: String,
}

#[derive(Debug, Serialize)]
pub struct Attachment {
    pub mime_type: String,
    pub data_base64: String,
}

#[derive(Debug, Serialize)]
pub struct InvokeFlowRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub input: InvocationInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

#[derive(Debug, Deserialize)]
pub struct InvokeFlowResponse {
    pub flow: String,
    pub output: Value,
    pub record_id: Option<String>,
    pub provider: String,
    pub model: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerationResponse {
    pub id: Uuid,
    pub flow: String,
    pub output: Value,
    pub provider: String,
    pub model: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    kind: String,
    message: String,
    #[serde(default)]
    violations: Vec<ViolationBody>,
}

#[derive(Debug, Deserialize)]
struct ViolationBody {
    path: String,
    message: String,
}

/// Readable error text from a failing response body
fn describe_error(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(err) => {
            let mut text = format!("{}: {}", err.kind, err.message);
            for v in err.violations {
                text.push_str(&format!("\n  - {}: {}", v.path, v.message));
            }
            text
        }
        Err(_) => body.to_string(),
    }
}

impl TrendifyClient {
    /// Create a new API client
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(|k| k.to_string()),
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {}", key)),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let resp = self
            .authorized(request)
            .send()
            .await
            .context("Failed to connect to Trendify API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("API error ({}): {}", status, describe_error(&body));
        }

        Ok(resp)
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(&url).send().await?;
        Ok(resp.status().is_success())
    }

    /// List the flow catalogue
    pub async fn list_flows(&self) -> Result<Vec<FlowSummary>> {
        let url = format!("{}/trendify/flows", self.base_url);
        let resp = self.send(self.client.get(&url)).await?;

        resp.json().await.context("Failed to parse response")
    }

    /// Run a flow
    pub async fn invoke_flow(
        &self,
        flow: &str,
        request: &InvokeFlowRequest,
    ) -> Result<InvokeFlowResponse> {
        let url = format!(
            "{}/trendify/flows/{}/invoke",
            self.base_url,
            urlencoding::encode(flow)
        );
        let resp = self.send(self.client.post(&url).json(request)).await?;

        resp.json().await.context("Failed to parse response")
    }

    /// Saved generations of a user, newest first
    pub async fn list_generations(
        &self,
        user_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<GenerationResponse>> {
        let mut url = format!(
            "{}/trendify/users/{}/generations",
            self.base_url,
            urlencoding::encode(user_id)
        );
        if let Some(limit) = limit {
            url.push_str(&format!("?limit={}", limit));
        }
        let resp = self.send(self.client.get(&url)).await?;

        resp.json().await.context("Failed to parse response")
    }
}
