//! Error types for the document chat backend.

use thiserror::Error;

/// Errors related to PDF text extraction and OCR fallback.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    #[error("document contains no extractable text")]
    NoText,

    #[error("OCR binary not found: {0}")]
    OcrUnavailable(String),

    #[error("OCR failed: {0}")]
    OcrFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to the remote embedding provider.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("failed to reach embedding provider: {0}")]
    Connection(String),

    #[error("embedding provider returned status {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("embedding request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid embedding response: {0}")]
    InvalidResponse(String),
}

/// Errors related to the remote chat completion provider.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("failed to reach completion provider: {0}")]
    Connection(String),

    #[error("completion provider returned status {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid completion response: {0}")]
    InvalidResponse(String),
}

/// Errors related to conversation storage.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to connect to database: {0}")]
    Connection(String),

    #[error("embedding dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("database error: {0}")]
    Query(#[from] sqlx::Error),
}

/// Errors raised by a chat turn.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("completion error: {0}")]
    Completion(#[from] CompletionError),
}

/// Errors raised by a document upload.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("only PDF files are supported, got {0}")]
    NotPdf(String),

    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors related to configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("missing environment variable {0}")]
    MissingEnv(String),
}
