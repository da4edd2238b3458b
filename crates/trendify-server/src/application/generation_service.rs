//! Generation Application Service (Use Case)
//!
//! Runs catalogue flows through the configured invokers and keeps a
//! history of results per user.

use std::sync::Arc;

use serde_json::Value;

use trendify::{
    flows, DocumentRepository, DomainError, GenerationRecord, InvocationError, InvocationInput,
    MediaAttachment, PromptInvoker, Provider,
};

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Unknown flow: {0}")]
    UnknownFlow(String),

    #[error("No AI provider is configured")]
    NoProvider,

    #[error("Flow {0} requires a media attachment")]
    MissingAttachment(String),

    #[error(transparent)]
    Invocation(#[from] InvocationError),

    #[error(transparent)]
    Repository(#[from] DomainError),
}

/// Result of a successful flow run
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub flow: String,
    pub output: Value,
    pub record_id: Option<String>,
    pub provider: Provider,
    pub model: String,
}

/// Application service for flow generations
pub struct GenerationService<R: DocumentRepository + ?Sized> {
    repo: Arc<R>,
    /// One invoker per configured provider, in fallback order
    invokers: Vec<PromptInvoker>,
}

impl<R: DocumentRepository + ?Sized> GenerationService<R> {
    pub fn new(repo: Arc<R>, invokers: Vec<PromptInvoker>) -> Self {
        Self { repo, invokers }
    }

    /// The preferred provider's invoker, or the first configured one
    fn invoker_for(&self, preferred: Provider) -> Option<&PromptInvoker> {
        self.invokers
            .iter()
            .find(|i| i.config().provider == preferred)
            .or_else(|| self.invokers.first())
    }

    /// Run a flow; persist the result when a user is given
    pub async fn generate(
        &self,
        flow_name: &str,
        user_id: Option<&str>,
        input: InvocationInput,
        attachments: Vec<MediaAttachment>,
    ) -> Result<GenerationOutcome, GenerationError> {
        let flow =
            flows::find(flow_name).ok_or_else(|| GenerationError::UnknownFlow(flow_name.into()))?;

        if flow.requires_attachment && attachments.is_empty() {
            return Err(GenerationError::MissingAttachment(flow.name.to_string()));
        }

        let invoker = self
            .invoker_for(flow.provider)
            .ok_or(GenerationError::NoProvider)?;
        let config = invoker.config();
        if config.provider != flow.provider {
            tracing::debug!(
                flow = flow.name,
                preferred = %flow.provider,
                using = %config.provider,
                "Preferred provider not configured, falling back"
            );
        }

        let output = invoker.run_flow(flow, &input, attachments).await?;

        let record_id = match user_id {
            Some(user_id) => {
                let record = GenerationRecord::new(
                    user_id.to_string(),
                    flow.name.to_string(),
                    Value::Object(input),
                    output.clone(),
                    config.provider,
                    config.model.clone(),
                );
                let id = record.id.to_string();
                let body = serde_json::to_value(&record)
                    .map_err(|e| DomainError::Repository(e.to_string()))?;
                self.repo
                    .put(GenerationRecord::COLLECTION, &id, Some(user_id), &body)
                    .await?;
                tracing::info!("💾 Saved generation {} for user {}", id, user_id);
                Some(id)
            }
            None => None,
        };

        Ok(GenerationOutcome {
            flow: flow.name.to_string(),
            output,
            record_id,
            provider: config.provider,
            model: config.model.clone(),
        })
    }

    /// Most recent generations of a user, newest first
    pub async fn history(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<GenerationRecord>, DomainError> {
        let documents = self
            .repo
            .list_by_owner(GenerationRecord::COLLECTION, user_id, limit)
            .await?;

        documents
            .into_iter()
            .map(|doc| {
                serde_json::from_value(doc.body).map_err(|e| {
                    DomainError::Repository(format!("Corrupt generation {}: {}", doc.id, e))
                })
            })
            .collect()
    }
}
