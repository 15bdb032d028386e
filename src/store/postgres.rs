use async_trait::async_trait;
use pgvector::Vector;
use sqlx::Row;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use std::time::Duration;

use super::ConversationStore;
use crate::error::StoreError;
use crate::models::{
    Conversation, ConversationSummary, DatabaseConfig, DocumentChunk, Message, MessageRole,
};

/// Postgres/pgvector-backed conversation store.
pub struct PgStore {
    pool: PgPool,
    embedding_dim: usize,
}

impl PgStore {
    pub async fn connect(
        url: &str,
        config: &DatabaseConfig,
        embedding_dim: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.pool_max)
            .acquire_timeout(Duration::from_secs(config.pool_acquire_timeout.into()))
            .connect(url)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self {
            pool,
            embedding_dim: embedding_dim as usize,
        })
    }

    /// Create the pgvector extension, tables, and indexes if absent.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query("CREATE EXTENSION IF NOT EXISTS vector")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS conversations (
                id BIGSERIAL PRIMARY KEY,
                title TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                id BIGSERIAL PRIMARY KEY,
                conversation_id BIGINT NOT NULL
                    REFERENCES conversations(id) ON DELETE CASCADE,
                role TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        let create_chunks = format!(
            r#"
            CREATE TABLE IF NOT EXISTS document_chunks (
                id BIGSERIAL PRIMARY KEY,
                conversation_id BIGINT NOT NULL
                    REFERENCES conversations(id) ON DELETE CASCADE,
                chunk TEXT NOT NULL,
                embedding vector({}) NOT NULL
            )
            "#,
            self.embedding_dim
        );
        sqlx::query(&create_chunks).execute(&self.pool).await?;

        let indexes = [
            "CREATE INDEX IF NOT EXISTS messages_conversation_idx \
             ON messages (conversation_id, created_at, id)",
            "CREATE INDEX IF NOT EXISTS document_chunks_conversation_idx \
             ON document_chunks (conversation_id)",
            "CREATE INDEX IF NOT EXISTS document_chunks_embedding_idx \
             ON document_chunks USING hnsw (embedding vector_l2_ops)",
        ];
        for index_sql in indexes {
            sqlx::query(index_sql).execute(&self.pool).await?;
        }

        Ok(())
    }
}

fn message_from_row(row: PgRow) -> Result<Message, StoreError> {
    let role: String = row.get("role");
    let role: MessageRole = role
        .parse()
        .map_err(|e: String| StoreError::Query(sqlx::Error::Decode(e.into())))?;

    Ok(Message {
        id: row.get("id"),
        conversation_id: row.get("conversation_id"),
        role,
        content: row.get("content"),
        created_at: row.get("created_at"),
    })
}

#[async_trait]
impl ConversationStore for PgStore {
    async fn create_conversation(&self, title: Option<&str>) -> Result<Conversation, StoreError> {
        let row = sqlx::query("INSERT INTO conversations (title) VALUES ($1) RETURNING id, title")
            .bind(title)
            .fetch_one(&self.pool)
            .await?;

        Ok(Conversation {
            id: row.get("id"),
            title: row.get("title"),
        })
    }

    async fn get_conversation(&self, id: i64) -> Result<Option<Conversation>, StoreError> {
        let row = sqlx::query("SELECT id, title FROM conversations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| Conversation {
            id: row.get("id"),
            title: row.get("title"),
        }))
    }

    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, StoreError> {
        let rows = sqlx::query("SELECT id, title FROM conversations ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| ConversationSummary {
                id: row.get("id"),
                title: row.get("title"),
            })
            .collect())
    }

    async fn append_message(
        &self,
        conversation_id: i64,
        role: MessageRole,
        content: &str,
    ) -> Result<Message, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO messages (conversation_id, role, content)
            VALUES ($1, $2, $3)
            RETURNING id, conversation_id, role, content, created_at
            "#,
        )
        .bind(conversation_id)
        .bind(role.to_string())
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        message_from_row(row)
    }

    async fn list_messages(&self, conversation_id: i64) -> Result<Vec<Message>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, conversation_id, role, content, created_at
            FROM messages
            WHERE conversation_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(message_from_row).collect()
    }

    async fn insert_chunk(&self, chunk: DocumentChunk) -> Result<(), StoreError> {
        if chunk.embedding.len() != self.embedding_dim {
            return Err(StoreError::DimensionMismatch {
                expected: self.embedding_dim,
                got: chunk.embedding.len(),
            });
        }

        sqlx::query(
            "INSERT INTO document_chunks (conversation_id, chunk, embedding) VALUES ($1, $2, $3)",
        )
        .bind(chunk.conversation_id)
        .bind(&chunk.chunk)
        .bind(Vector::from(chunk.embedding))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn search_chunks(
        &self,
        conversation_id: i64,
        query_vector: &[f32],
        top_k: u32,
    ) -> Result<Vec<String>, StoreError> {
        if query_vector.len() != self.embedding_dim {
            return Err(StoreError::DimensionMismatch {
                expected: self.embedding_dim,
                got: query_vector.len(),
            });
        }

        let rows = sqlx::query(
            r#"
            SELECT chunk
            FROM document_chunks
            WHERE conversation_id = $1
            ORDER BY embedding <-> $2, id
            LIMIT $3
            "#,
        )
        .bind(conversation_id)
        .bind(Vector::from(query_vector.to_vec()))
        .bind(i64::from(top_k))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|row| row.get("chunk")).collect())
    }
}
