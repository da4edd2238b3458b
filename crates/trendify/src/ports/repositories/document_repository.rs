//! Document Repository Port
//!
//! Opaque JSON document store. Collections are plain names such as
//! `generations` or `payment_events`; the store never interprets bodies.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::DomainError;

/// A stored document with its bookkeeping columns
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub collection: String,
    pub id: String,
    pub owner: Option<String>,
    pub body: Value,
}

/// Repository interface for the document store
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Insert or replace a document
    async fn put(
        &self,
        collection: &str,
        id: &str,
        owner: Option<&str>,
        body: &Value,
    ) -> Result<(), DomainError>;

    /// Find a document by collection and ID
    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, DomainError>;

    /// Newest documents of a collection belonging to `owner`
    async fn list_by_owner(
        &self,
        collection: &str,
        owner: &str,
        limit: i64,
    ) -> Result<Vec<StoredDocument>, DomainError>;
}
