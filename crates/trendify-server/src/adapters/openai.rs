//! OpenAI adapter (chat completions, JSON mode)

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use trendify::{GenerationRequest, GenerativeProvider, InvocationError, ModelConfig};

use super::{status_error, transport_error};

/// OpenAI implementation of GenerativeProvider
#[derive(Clone)]
pub struct OpenAiProvider {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl OpenAiProvider {
    pub fn new(config: &ModelConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl GenerativeProvider for OpenAiProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, InvocationError> {
        let body = build_body(request)?;

        let mut call = self
            .client
            .post(format!("{}/chat/completions", self.endpoint))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body);
        if let Some(timeout) = request.timeout {
            call = call.timeout(timeout);
        }

        let response = call.send().await.map_err(transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| InvocationError::network(format!("invalid provider response: {e}")))?;

        extract_text(&payload)
            .ok_or_else(|| InvocationError::network("OpenAI response contained no message content"))
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}

// ============================================
// Request Types
// ============================================

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: MessageContent,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Chat completions body; only image attachments can be sent
fn build_body(request: &GenerationRequest) -> Result<ChatRequest, InvocationError> {
    if let Some(media) = request.attachments.iter().find(|m| !m.is_image()) {
        return Err(InvocationError::network(format!(
            "OpenAI chat completions cannot accept {} attachments",
            media.mime_type
        )));
    }

    let content = if request.attachments.is_empty() {
        MessageContent::Text(request.prompt.clone())
    } else {
        let mut parts = vec![ContentPart::Text {
            text: request.prompt.clone(),
        }];
        parts.extend(request.attachments.iter().map(|media| ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: format!("data:{};base64,{}", media.mime_type, STANDARD.encode(&media.data)),
            },
        }));
        MessageContent::Parts(parts)
    };

    Ok(ChatRequest {
        model: request.model.clone(),
        messages: vec![Message {
            role: "user",
            content,
        }],
        temperature: request.temperature,
        response_format: request.json_output.then_some(ResponseFormat {
            kind: "json_object",
        }),
    })
}

fn extract_text(root: &Value) -> Option<String> {
    root.get("choices")?
        .as_array()?
        .first()?
        .get("message")?
        .get("content")?
        .as_str()
        .map(|s| s.to_string())
}
