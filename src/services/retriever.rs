//! Retrieval of conversation-scoped context for a query.

use std::sync::Arc;

use crate::error::ChatError;
use crate::models::RetrievalConfig;
use crate::services::embedding::{EmbeddingKind, EmbeddingProvider};
use crate::store::ConversationStore;

/// Embeds a query and returns the nearest stored chunks for a conversation,
/// nearest first. No caching, no re-ranking beyond the store's ordering.
pub struct Retriever {
    embeddings: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn ConversationStore>,
    top_k: u32,
}

impl Retriever {
    pub fn new(
        embeddings: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn ConversationStore>,
        config: &RetrievalConfig,
    ) -> Self {
        Self {
            embeddings,
            store,
            top_k: config.top_k,
        }
    }

    pub async fn retrieve(
        &self,
        conversation_id: i64,
        query: &str,
    ) -> Result<Vec<String>, ChatError> {
        let query_vector = self.embeddings.embed(query, EmbeddingKind::Query).await?;
        let chunks = self
            .store
            .search_chunks(conversation_id, &query_vector, self.top_k)
            .await?;
        Ok(chunks)
    }
}
