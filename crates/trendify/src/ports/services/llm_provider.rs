//! Generative Provider Port
//!
//! Abstract interface for a single generative-model call. One
//! implementation per provider API (OpenAI chat completions, Google
//! Gemini generateContent) lives in the server crate.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::entities::{MediaAttachment, ModelConfig};
use crate::domain::errors::InvocationError;

/// Everything a provider needs for one outbound request
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub attachments: Vec<MediaAttachment>,
    /// Temperature (0.0 - 2.0)
    pub temperature: f32,
    /// Ask the provider for a JSON-only response when it supports it
    pub json_output: bool,
    pub timeout: Option<Duration>,
}

impl GenerationRequest {
    pub fn new(config: &ModelConfig, prompt: impl Into<String>) -> Self {
        Self {
            model: config.model.clone(),
            prompt: prompt.into(),
            attachments: Vec::new(),
            temperature: config.temperature,
            json_output: true,
            timeout: config.timeout(),
        }
    }

    pub fn with_attachments(mut self, attachments: Vec<MediaAttachment>) -> Self {
        self.attachments = attachments;
        self
    }
}

/// Generative provider interface
///
/// Implementations perform exactly one HTTP call per `generate` and return
/// the model's raw text. Non-2xx responses and transport failures map to
/// [`InvocationError::Network`].
///
/// # Example
///
/// ```rust,ignore
/// use trendify::ports::GenerativeProvider;
///
/// struct GeminiProvider { /* ... */ }
///
/// #[async_trait]
/// impl GenerativeProvider for GeminiProvider {
///     async fn generate(&self, request: &GenerationRequest) -> Result<String, InvocationError> {
///         // Call generateContent
///     }
///     fn provider_name(&self) -> &str { "google" }
/// }
/// ```
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Send the prompt and return the raw model text
    async fn generate(&self, request: &GenerationRequest) -> Result<String, InvocationError>;

    /// Provider name (e.g. "openai", "google")
    fn provider_name(&self) -> &str;
}
