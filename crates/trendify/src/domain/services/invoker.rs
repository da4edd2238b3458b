//! PromptInvoker - The render / dispatch / extract / validate / normalize pipeline
//!
//! One invoker is built per configured provider at process start and shared
//! behind an `Arc`. Invocations hold no mutable state, so any number of them
//! may run concurrently.

use std::sync::Arc;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::entities::{
    InvocationInput, MediaAttachment, ModelConfig, OutputSchema, PromptTemplate,
};
use crate::domain::errors::{InvocationError, Violation};
use crate::domain::services::{extract_json, normalize, validate};
use crate::flows::Flow;
use crate::ports::{GenerationRequest, GenerativeProvider};

const SCHEMA_HINT_PREAMBLE: &str =
    "\n\nRespond only with a JSON object matching this JSON Schema:\n";

/// Typed pipeline around a single [`GenerativeProvider`]
#[derive(Clone)]
pub struct PromptInvoker {
    provider: Arc<dyn GenerativeProvider>,
    config: ModelConfig,
    schema_hint: bool,
}

impl PromptInvoker {
    pub fn new(provider: Arc<dyn GenerativeProvider>, config: ModelConfig) -> Self {
        Self {
            provider,
            config,
            schema_hint: true,
        }
    }

    /// Append the schema's JSON Schema rendition to every prompt (default: on)
    pub fn with_schema_hint(mut self, enabled: bool) -> Self {
        self.schema_hint = enabled;
        self
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Render, call the model once, and return output conforming to `schema`
    pub async fn invoke(
        &self,
        template: &PromptTemplate,
        schema: &OutputSchema,
        input: &InvocationInput,
    ) -> Result<Value, InvocationError> {
        self.invoke_with_media(template, schema, input, Vec::new())
            .await
    }

    /// Same as [`invoke`](Self::invoke), with media sent as separate parts
    pub async fn invoke_with_media(
        &self,
        template: &PromptTemplate,
        schema: &OutputSchema,
        input: &InvocationInput,
        attachments: Vec<MediaAttachment>,
    ) -> Result<Value, InvocationError> {
        let started = Instant::now();
        let result = self.run(template, schema, input, attachments).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(_) => tracing::info!(
                provider = %self.config.provider,
                model = %self.config.model,
                elapsed_ms,
                "✨ Invocation succeeded"
            ),
            Err(e) => tracing::warn!(
                provider = %self.config.provider,
                model = %self.config.model,
                kind = %e.kind(),
                elapsed_ms,
                "Invocation failed: {}",
                e
            ),
        }

        result
    }

    /// Invoke and deserialize the validated value into `T`
    ///
    /// A value that validates but does not fit `T` is reported as a schema
    /// violation at the root.
    pub async fn invoke_as<T: DeserializeOwned>(
        &self,
        template: &PromptTemplate,
        schema: &OutputSchema,
        input: &InvocationInput,
    ) -> Result<T, InvocationError> {
        let value = self.invoke(template, schema, input).await?;
        serde_json::from_value(value).map_err(|e| {
            InvocationError::SchemaValidation(vec![Violation::new("$", e.to_string())])
        })
    }

    /// Run a catalogue flow with its own template and schema
    pub async fn run_flow(
        &self,
        flow: &Flow,
        input: &InvocationInput,
        attachments: Vec<MediaAttachment>,
    ) -> Result<Value, InvocationError> {
        tracing::debug!(flow = flow.name, "Running flow");
        self.invoke_with_media(&flow.template, &flow.schema, input, attachments)
            .await
    }

    async fn run(
        &self,
        template: &PromptTemplate,
        schema: &OutputSchema,
        input: &InvocationInput,
        attachments: Vec<MediaAttachment>,
    ) -> Result<Value, InvocationError> {
        let mut prompt = template.render(input)?;
        tracing::debug!(prompt_chars = prompt.chars().count(), "Rendered prompt");

        if self.schema_hint {
            prompt.push_str(SCHEMA_HINT_PREAMBLE);
            prompt.push_str(&schema.to_json_schema().to_string());
        }

        let request = GenerationRequest::new(&self.config, prompt).with_attachments(attachments);
        tracing::debug!(
            provider = self.provider.provider_name(),
            model = %request.model,
            attachments = request.attachments.len(),
            "Dispatching generation request"
        );

        let text = self.provider.generate(&request).await?;
        let value = extract_json(&text)?;
        validate(schema, &value).map_err(InvocationError::SchemaValidation)?;

        // A rule on a non-union field can produce a shape the schema rejects
        let value = normalize(schema, value);
        validate(schema, &value).map_err(InvocationError::SchemaValidation)?;
        Ok(value)
    }
}
