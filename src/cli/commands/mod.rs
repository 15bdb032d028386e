//! Command handlers and service wiring.

mod chat;
mod init_db;
mod list;
mod serve;
mod upload;

pub use chat::{ChatArgs, handle_chat};
pub use init_db::handle_init_db;
pub use list::{MessagesArgs, handle_conversations, handle_messages};
pub use serve::handle_serve;
pub use upload::{UploadArgs, handle_upload};

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::models::Config;
use crate::services::{
    ChatCompletions, ChatService, CompletionProvider, EmbeddingProvider, IngestService,
    ParagraphChunker, PdfExtractor, Retriever, VoyageEmbeddings,
};
use crate::store::{ConversationStore, PgStore};

pub(crate) async fn connect_store(config: &Config) -> Result<Arc<PgStore>> {
    let url = config.database.url()?;
    let store = PgStore::connect(&url, &config.database, config.embedding.dimension)
        .await
        .context("failed to connect to database")?;
    Ok(Arc::new(store))
}

pub(crate) fn embedding_provider(config: &Config) -> Result<Arc<dyn EmbeddingProvider>> {
    let api_key = config.embedding.api_key()?;
    let client = VoyageEmbeddings::new(&config.embedding, api_key)
        .context("failed to build embedding client")?;
    Ok(Arc::new(client))
}

pub(crate) fn completion_provider(config: &Config) -> Result<Arc<dyn CompletionProvider>> {
    let api_key = config.completion.api_key()?;
    let client = ChatCompletions::new(&config.completion, api_key)
        .context("failed to build completion client")?;
    Ok(Arc::new(client))
}

pub(crate) fn chat_service(
    config: &Config,
    store: Arc<dyn ConversationStore>,
    embeddings: Arc<dyn EmbeddingProvider>,
    completions: Arc<dyn CompletionProvider>,
) -> ChatService {
    let retriever = Retriever::new(embeddings, Arc::clone(&store), &config.retrieval);
    ChatService::new(store, retriever, completions)
}

pub(crate) fn ingest_service(
    config: &Config,
    store: Arc<dyn ConversationStore>,
    embeddings: Arc<dyn EmbeddingProvider>,
) -> IngestService {
    IngestService::new(
        store,
        embeddings,
        Arc::new(PdfExtractor::new(&config.extraction)),
        ParagraphChunker::new(&config.chunking),
    )
}
