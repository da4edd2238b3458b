//! Test doubles shared by service and route tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use trendify::{
    DocumentRepository, DomainError, GenerationRequest, GenerativeProvider, InvocationError,
    ModelConfig, PaymentGateway, PromptInvoker, Provider, StoredDocument,
};

use crate::application::{BillingService, GenerationService};
use crate::AppState;

/// In-memory document store, insertion ordered
#[derive(Default)]
pub(crate) struct MemoryRepository {
    pub(crate) documents: Mutex<Vec<StoredDocument>>,
}

#[async_trait]
impl DocumentRepository for MemoryRepository {
    async fn put(
        &self,
        collection: &str,
        id: &str,
        owner: Option<&str>,
        body: &Value,
    ) -> Result<(), DomainError> {
        let mut documents = self.documents.lock().unwrap();
        documents.retain(|d| !(d.collection == collection && d.id == id));
        documents.push(StoredDocument {
            collection: collection.to_string(),
            id: id.to_string(),
            owner: owner.map(str::to_string),
            body: body.clone(),
        });
        Ok(())
    }

    async fn get(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<StoredDocument>, DomainError> {
        let documents = self.documents.lock().unwrap();
        Ok(documents
            .iter()
            .find(|d| d.collection == collection && d.id == id)
            .cloned())
    }

    async fn list_by_owner(
        &self,
        collection: &str,
        owner: &str,
        limit: i64,
    ) -> Result<Vec<StoredDocument>, DomainError> {
        let documents = self.documents.lock().unwrap();
        Ok(documents
            .iter()
            .rev()
            .filter(|d| d.collection == collection && d.owner.as_deref() == Some(owner))
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

/// Provider answering every prompt with the same text
pub(crate) struct CannedProvider {
    pub(crate) name: &'static str,
    pub(crate) reply: String,
}

#[async_trait]
impl GenerativeProvider for CannedProvider {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, InvocationError> {
        Ok(self.reply.clone())
    }

    fn provider_name(&self) -> &str {
        self.name
    }
}

pub(crate) fn canned_invoker(provider: Provider, reply: &str) -> PromptInvoker {
    let name = match provider {
        Provider::Google => "google",
        Provider::OpenAI => "openai",
    };
    PromptInvoker::new(
        Arc::new(CannedProvider {
            name,
            reply: reply.to_string(),
        }),
        ModelConfig::new(provider, "test-key"),
    )
}

pub(crate) const IDEAS_REPLY: &str = r#"{"ideas": ["duet", {"idea": "gym swap"}, "live"]}"#;

pub(crate) const TEST_WEBHOOK_SECRET: &str = "whsec_test";

/// App state over an in-memory store, with only the Asaas secret configured
pub(crate) fn test_state(
    api_key: Option<&str>,
    invokers: Vec<PromptInvoker>,
) -> (Arc<MemoryRepository>, AppState) {
    let repo = Arc::new(MemoryRepository::default());
    let store: Arc<dyn DocumentRepository> = repo.clone();
    let secrets = HashMap::from([(PaymentGateway::Asaas, TEST_WEBHOOK_SECRET.to_string())]);

    let state = AppState {
        api_key: api_key.map(Arc::from),
        generation_service: Arc::new(GenerationService::new(store.clone(), invokers)),
        billing_service: Arc::new(BillingService::new(store, secrets)),
    };
    (repo, state)
}

pub(crate) async fn read_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
