//! GenerationRecord - Persisted output of a successful flow invocation
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::Provider;

/// GenerationRecord - one AI result saved for a creator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub id: Uuid,
    pub user_id: String,
    pub flow: String,
    pub input: serde_json::Value,
    pub output: serde_json::Value,
    pub provider: Provider,
    pub model: String,
    pub created_at: DateTime<Utc>,
}

impl GenerationRecord {
    /// Document collection holding generation records
    pub const COLLECTION: &'static str = "generations";

    pub fn new(
        user_id: String,
        flow: String,
        input: serde_json::Value,
        output: serde_json::Value,
        provider: Provider,
        model: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            flow,
            input,
            output,
            provider,
            model,
            created_at: Utc::now(),
        }
    }
}
