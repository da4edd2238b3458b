//! Generation history DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use trendify::GenerationRecord;

/// A saved generation
#[derive(Debug, Serialize, ToSchema)]
pub struct GenerationResponse {
    pub id: Uuid,
    pub user_id: String,
    pub flow: String,
    #[schema(value_type = Object)]
    pub input: serde_json::Value,
    #[schema(value_type = Object)]
    pub output: serde_json::Value,
    pub provider: String,
    pub model: String,
    pub created_at: DateTime<Utc>,
}

impl GenerationResponse {
    pub fn from_domain(record: GenerationRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            flow: record.flow,
            input: record.input,
            output: record.output,
            provider: record.provider.to_string(),
            model: record.model,
            created_at: record.created_at,
        }
    }
}
