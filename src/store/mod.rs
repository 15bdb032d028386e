//! Conversation persistence and similarity search.
//!
//! The trait is the capability seam between the chat/ingest services and the
//! backing database; tests substitute an in-memory implementation.

mod postgres;

pub use postgres::PgStore;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{Conversation, ConversationSummary, DocumentChunk, Message, MessageRole};

/// Persists conversations, messages, and embedded document chunks.
///
/// Messages and chunks never outlive their conversation. Each write is
/// atomic; partial writes are never visible to concurrent readers.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Create a conversation with an optional title.
    async fn create_conversation(&self, title: Option<&str>) -> Result<Conversation, StoreError>;

    /// Look up a conversation by id.
    async fn get_conversation(&self, id: i64) -> Result<Option<Conversation>, StoreError>;

    /// List all conversations.
    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, StoreError>;

    /// Append an immutable message; the store assigns id and timestamp.
    async fn append_message(
        &self,
        conversation_id: i64,
        role: MessageRole,
        content: &str,
    ) -> Result<Message, StoreError>;

    /// List a conversation's messages ordered by `(created_at, id)` ascending.
    async fn list_messages(&self, conversation_id: i64) -> Result<Vec<Message>, StoreError>;

    /// Insert an embedded chunk. A vector whose dimension does not match the
    /// store's fixed dimension is a fatal write error.
    async fn insert_chunk(&self, chunk: DocumentChunk) -> Result<(), StoreError>;

    /// Return the `top_k` chunk texts nearest to the query vector, nearest
    /// first, scoped strictly to the given conversation. Distance ties break
    /// by insertion id. Fewer stored chunks than `top_k` returns all of them.
    async fn search_chunks(
        &self,
        conversation_id: i64,
        query_vector: &[f32],
        top_k: u32,
    ) -> Result<Vec<String>, StoreError>;

    /// Resolve an existing conversation, or create one with the default
    /// title when no id is supplied or the id does not resolve. Shared by
    /// the upload and chat entry points.
    async fn resolve_or_create(
        &self,
        id: Option<i64>,
        default_title: &str,
    ) -> Result<Conversation, StoreError> {
        if let Some(id) = id
            && let Some(conversation) = self.get_conversation(id).await?
        {
            return Ok(conversation);
        }
        self.create_conversation(Some(default_title)).await
    }
}
