//! Document upload pipeline: extract, chunk, embed, store.

use std::sync::Arc;

use tracing::info;

use crate::error::UploadError;
use crate::models::{DocumentChunk, UploadReceipt};
use crate::services::chunker::ParagraphChunker;
use crate::services::embedding::{EmbeddingKind, EmbeddingProvider};
use crate::services::extraction::TextExtractor;
use crate::store::ConversationStore;

/// Turns an uploaded PDF into embedded chunks owned by a conversation.
pub struct IngestService {
    store: Arc<dyn ConversationStore>,
    embeddings: Arc<dyn EmbeddingProvider>,
    extractor: Arc<dyn TextExtractor>,
    chunker: ParagraphChunker,
}

impl IngestService {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        embeddings: Arc<dyn EmbeddingProvider>,
        extractor: Arc<dyn TextExtractor>,
        chunker: ParagraphChunker,
    ) -> Self {
        Self {
            store,
            embeddings,
            extractor,
            chunker,
        }
    }

    /// Ingest a document into the given conversation, creating one titled by
    /// the filename when none resolves.
    ///
    /// Chunks are embedded and committed one at a time; a provider failure
    /// midway leaves the earlier chunks committed and surfaces the error.
    pub async fn upload(
        &self,
        filename: &str,
        bytes: &[u8],
        conversation_id: Option<i64>,
    ) -> Result<UploadReceipt, UploadError> {
        let extracted = self.extractor.extract(bytes).await?;

        let conversation = self
            .store
            .resolve_or_create(conversation_id, filename)
            .await?;

        let chunks = self.chunker.chunk(&extracted.text);
        for chunk in &chunks {
            let embedding = self
                .embeddings
                .embed(chunk, EmbeddingKind::Document)
                .await?;
            self.store
                .insert_chunk(DocumentChunk {
                    conversation_id: conversation.id,
                    chunk: chunk.clone(),
                    embedding,
                })
                .await?;
        }

        info!(
            conversation_id = conversation.id,
            num_chunks = chunks.len(),
            text_source = %extracted.source,
            "document ingested"
        );

        Ok(UploadReceipt {
            conversation_id: conversation.id,
            num_chunks: chunks.len(),
            ocr_used: extracted.ocr_used(),
            pages_processed: extracted.pages_processed,
            text_source: extracted.source,
        })
    }
}
