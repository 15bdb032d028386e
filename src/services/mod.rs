mod chat;
mod chunker;
mod completion;
mod embedding;
mod extraction;
mod ingest;
mod prompt;
mod retriever;

pub use chat::{ChatService, DEFAULT_CHAT_TITLE};
pub use chunker::ParagraphChunker;
pub use completion::{ChatCompletions, CompletionProvider};
pub use embedding::{EmbeddingKind, EmbeddingProvider, VoyageEmbeddings};
pub use extraction::{ExtractedDocument, PdfExtractor, TextExtractor};
pub use ingest::IngestService;
pub use prompt::{HISTORY_WINDOW, compose, contains_ethiopic};
pub use retriever::Retriever;
