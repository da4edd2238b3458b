//! Invocation - Per-call input and process-wide model configuration

use std::time::Duration;

use crate::domain::value_objects::Provider;

/// Placeholder name -> value, supplied by the caller
pub type InvocationInput = serde_json::Map<String, serde_json::Value>;

/// Model configuration, built once at startup and bound to an invoker
#[derive(Clone)]
pub struct ModelConfig {
    pub provider: Provider,
    /// Base URL of the provider API
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    /// Sampling temperature (0.0 - 2.0)
    pub temperature: f32,
    /// Deadline for the single outbound call; `None` keeps the client default
    pub timeout_ms: Option<u64>,
}

impl ModelConfig {
    /// Configuration with the provider's default endpoint and model
    pub fn new(provider: Provider, api_key: impl Into<String>) -> Self {
        Self {
            provider,
            endpoint: provider.default_endpoint().to_string(),
            api_key: api_key.into(),
            model: provider.default_model().to_string(),
            temperature: 0.7,
            timeout_ms: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

// The API key must never end up in logs.
impl std::fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelConfig")
            .field("provider", &self.provider)
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

/// Binary media sent alongside the prompt (e.g. a video to review)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAttachment {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl MediaAttachment {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}
