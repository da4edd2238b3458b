//! PostgreSQL implementation of DocumentRepository
//!
//! A single `documents` table keyed by `(collection, id)` with a JSONB body.

use async_trait::async_trait;
use sqlx::PgPool;

use trendify::{DocumentRepository, DomainError, StoredDocument};

/// PostgreSQL implementation of DocumentRepository
pub struct PgDocumentRepository {
    pool: PgPool,
}

impl PgDocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct DocumentRow {
    collection: String,
    id: String,
    owner: Option<String>,
    body: serde_json::Value,
}

impl From<DocumentRow> for StoredDocument {
    fn from(row: DocumentRow) -> Self {
        Self {
            collection: row.collection,
            id: row.id,
            owner: row.owner,
            body: row.body,
        }
    }
}

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    async fn put(
        &self,
        collection: &str,
        id: &str,
        owner: Option<&str>,
        body: &serde_json::Value,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, owner, body)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (collection, id)
            DO UPDATE SET owner = EXCLUDED.owner, body = EXCLUDED.body, updated_at = NOW()
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(owner)
        .bind(body)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, DomainError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT collection, id, owner, body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn list_by_owner(
        &self,
        collection: &str,
        owner: &str,
        limit: i64,
    ) -> Result<Vec<StoredDocument>, DomainError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT collection, id, owner, body FROM documents
            WHERE collection = $1 AND owner = $2
            ORDER BY created_at DESC
            LIMIT $3
            "#,
        )
        .bind(collection)
        .bind(owner)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
