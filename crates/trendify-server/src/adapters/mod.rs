//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod gemini;
pub mod openai;
pub mod postgres;
pub mod signature;

// Re-exports
pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;
pub use postgres::PgDocumentRepository;

use std::sync::Arc;

use reqwest::StatusCode;
use trendify::{GenerativeProvider, InvocationError, ModelConfig, Provider};

/// Build the adapter matching the configured provider
pub fn provider_for(config: &ModelConfig) -> Arc<dyn GenerativeProvider> {
    match config.provider {
        Provider::Google => Arc::new(GeminiProvider::new(config)),
        Provider::OpenAI => Arc::new(OpenAiProvider::new(config)),
    }
}

/// Map a non-2xx provider response, preferring the provider's own message
pub(crate) fn status_error(status: StatusCode, body: &str) -> InvocationError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|err| err.get("message"))
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status.to_string()
            } else {
                body.to_string()
            }
        });

    InvocationError::http_status(status.as_u16(), message)
}

/// Map a transport failure; the URL is dropped since it may carry a key
pub(crate) fn transport_error(err: reqwest::Error) -> InvocationError {
    if err.is_timeout() {
        return InvocationError::network("request to provider timed out");
    }
    InvocationError::network(format!("request failed: {}", err.without_url()))
}
