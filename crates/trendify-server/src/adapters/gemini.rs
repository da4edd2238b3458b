//! Google Gemini adapter (`generateContent`)

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use trendify::{GenerationRequest, GenerativeProvider, InvocationError, ModelConfig};

use super::{status_error, transport_error};

/// Gemini implementation of GenerativeProvider
#[derive(Clone)]
pub struct GeminiProvider {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GeminiProvider {
    pub fn new(config: &ModelConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl GenerativeProvider for GeminiProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, InvocationError> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            self.endpoint,
            model = request.model,
            api_key = self.api_key
        );

        let mut call = self.client.post(&url).json(&build_body(request));
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
            .ok_or_else(|| InvocationError::network("Gemini response contained no text"))
    }

    fn provider_name(&self) -> &str {
        "google"
    }
}

// ============================================
// Request Types
// ============================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    Inline { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    temperature: f32,
}

fn build_body(request: &GenerationRequest) -> GenerateContentRequest {
    let mut parts = vec![Part::Text {
        text: request.prompt.clone(),
    }];
    parts.extend(request.attachments.iter().map(|media| Part::Inline {
        inline_data: InlineData {
            mime_type: media.mime_type.clone(),
            data: STANDARD.encode(&media.data),
        },
    }));

    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts,
        }],
        generation_config: GenerationConfig {
            response_mime_type: request.json_output.then_some("application/json"),
            temperature: request.temperature,
        },
    }
}

/// Text parts of the first candidate, concatenated
///
/// `None` only when the candidate has no parts; empty text is returned as is.
fn extract_text(root: &Value) -> Option<String> {
    let parts = root
        .get("candidates")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?;

    Some(
        parts
            .iter()
            .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, routing::post, Json, Router};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;
    use trendify::{
        ErrorKind, FieldSchema, InvocationInput, MediaAttachment, OutputSchema, PromptInvoker,
        PromptTemplate, Provider, SchemaType,
    };

    fn request() -> GenerationRequest {
        let config = ModelConfig::new(Provider::Google, "g-key").with_temperature(0.4);
        GenerationRequest::new(&config, "Rate this video")
            .with_attachments(vec![MediaAttachment::new("video/mp4", b"abc".to_vec())])
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(build_body(&request())).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Rate this video");
        assert_eq!(
            body["contents"][0]["parts"][1]["inline_data"],
            json!({"mime_type": "video/mp4", "data": "YWJj"})
        );
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert!((body["generationConfig"]["temperature"].as_f64().unwrap() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let payload = json!({
            "candidates": [{"content": {"parts": [{"text": "{\"a\":"}, {"text": " 1}"}]}}]
        });
        assert_eq!(extract_text(&payload).as_deref(), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_extract_text_missing() {
        assert!(extract_text(&json!({"candidates": []})).is_none());
        assert!(extract_text(&json!({"promptFeedback": {"blockReason": "SAFETY"}})).is_none());
    }

    #[test]
    fn test_extract_text_empty_answer() {
        let payload = json!({"candidates": [{"content": {"parts": [{"text": ""}]}}]});
        assert_eq!(extract_text(&payload).as_deref(), Some(""));
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/v1beta/models", addr)
    }

    #[tokio::test]
    async fn test_generate_against_local_server() {
        let router = Router::new().route(
            "/v1beta/models/:call",
            post(
                |axum::extract::Path(call): axum::extract::Path<String>,
                 Query(query): Query<HashMap<String, String>>,
                 Json(body): Json<Value>| async move {
                    assert_eq!(call, "gemini-2.0-flash:generateContent");
                    assert_eq!(query.get("key").map(String::as_str), Some("g-key"));
                    assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
                    Json(json!({
                        "candidates": [{"content": {"parts": [{"text": "{\"score\": 7}"}]}}]
                    }))
                },
            ),
        );
        let endpoint = serve(router).await;

        let config = ModelConfig::new(Provider::Google, "g-key").with_endpoint(endpoint);
        let provider = GeminiProvider::new(&config);
        let text = provider
            .generate(&GenerationRequest::new(&config, "hello"))
            .await
            .unwrap();

        assert_eq!(text, "{\"score\": 7}");
    }

    #[tokio::test]
    async fn test_generate_maps_error_status() {
        let router = Router::new().route(
            "/v1beta/models/:call",
            post(|| async {
                (
                    axum::http::StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({"error": {"message": "Resource has been exhausted"}})),
                )
            }),
        );
        let endpoint = serve(router).await;

        let config = ModelConfig::new(Provider::Google, "g-key").with_endpoint(endpoint);
        let err = GeminiProvider::new(&config)
            .generate(&GenerationRequest::new(&config, "hello"))
            .await
            .unwrap_err();

        match err {
            InvocationError::Network { status, message } => {
                assert_eq!(status, Some(429));
                assert_eq!(message, "Resource has been exhausted");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_answer_is_extraction_error() {
        let router = Router::new().route(
            "/v1beta/models/:call",
            post(|| async {
                Json(json!({"candidates": [{"content": {"parts": [{"text": ""}]}}]}))
            }),
        );
        let endpoint = serve(router).await;

        let config = ModelConfig::new(Provider::Google, "g-key").with_endpoint(endpoint);
        let invoker = PromptInvoker::new(Arc::new(GeminiProvider::new(&config)), config);
        let schema = OutputSchema::new(vec![FieldSchema::required("score", SchemaType::number())]);

        let err = invoker
            .invoke(
                &PromptTemplate::new("Score it").unwrap(),
                &schema,
                &InvocationInput::new(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ExtractionError);
    }

    #[tokio::test]
    async fn test_deadline_surfaces_as_network_error() {
        let router = Router::new().route(
            "/v1beta/models/:call",
            post(|| async {
                tokio::time::sleep(std::time::Duration::from_millis(500)).await;
                Json(json!({"candidates": [{"content": {"parts": [{"text": "{}"}]}}]}))
            }),
        );
        let endpoint = serve(router).await;

        let config = ModelConfig::new(Provider::Google, "g-key")
            .with_endpoint(endpoint)
            .with_timeout_ms(50);
        let err = GeminiProvider::new(&config)
            .generate(&GenerationRequest::new(&config, "hello"))
            .await
            .unwrap_err();

        match err {
            InvocationError::Network { status, message } => {
                assert_eq!(status, None);
                assert_eq!(message, "request to provider timed out");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
