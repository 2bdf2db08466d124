use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::store::{Document, DocumentStore};

/// Postgres-backed store: one `documents` table holding every collection
/// as JSONB rows. Equality queries go through `data->>field`, so the
/// store enforces nothing beyond what callers construct.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

#[derive(FromRow)]
struct DocumentRow {
    id: Uuid,
    collection: String,
    data: Value,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            id: row.id,
            collection: row.collection,
            data: row.data,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl PgStore {
    /// Connects the pool and ensures the backing table exists.
    pub async fn connect(database_url: &str) -> Result<Self> {
        info!("Connecting to PostgreSQL...");

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id UUID PRIMARY KEY,
                collection TEXT NOT NULL,
                data JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&pool)
        .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS documents_collection_idx ON documents (collection)")
            .execute(&pool)
            .await?;

        info!("PostgreSQL connection pool established");
        Ok(PgStore { pool })
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn insert(&self, collection: &str, data: Value) -> Result<Document, AppError> {
        let row: DocumentRow = sqlx::query_as(
            r#"
            INSERT INTO documents (id, collection, data)
            VALUES ($1, $2, $3)
            RETURNING id, collection, data, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(collection)
        .bind(data)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn find_eq(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, AppError> {
        let rows: Vec<DocumentRow> = sqlx::query_as(
            r#"
            SELECT id, collection, data, created_at, updated_at
            FROM documents
            WHERE collection = $1 AND data->>$2 = $3
            ORDER BY created_at, id
            "#,
        )
        .bind(collection)
        .bind(field)
        .bind(value)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn scan(&self, collection: &str) -> Result<Vec<Document>, AppError> {
        let rows: Vec<DocumentRow> = sqlx::query_as(
            r#"
            SELECT id, collection, data, created_at, updated_at
            FROM documents
            WHERE collection = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<Document>, AppError> {
        let row: Option<DocumentRow> = sqlx::query_as(
            r#"
            SELECT id, collection, data, created_at, updated_at
            FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Document::from))
    }
}
