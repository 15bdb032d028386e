mod api;
mod config;
mod conversation;

pub use api::{ChatReply, ChatRequest, ConversationSummary, TextSource, UploadReceipt};
pub use config::{
    ChunkingConfig, CompletionConfig, Config, DatabaseConfig, DEFAULT_COMPLETION_MODEL,
    DEFAULT_EMBEDDING_DIMENSION, DEFAULT_EMBEDDING_MODEL, EmbeddingConfig, ExtractionConfig,
    RetrievalConfig, ServerConfig,
};
pub use conversation::{Conversation, DocumentChunk, Message, MessageRole};
