//! Request handlers and error-to-status mapping.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use super::AppState;
use crate::error::{ChatError, ExtractionError, StoreError, UploadError};
use crate::models::{ChatReply, ChatRequest, ConversationSummary, Message, UploadReceipt};

/// Content types accepted by the upload endpoint.
const PDF_CONTENT_TYPES: [&str; 3] = [
    "application/pdf",
    "application/x-pdf",
    "application/octet-stream",
];

/// An HTTP-facing failure with its status code.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.message }))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        error!(%err, "store failure");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Store(e) => e.into(),
            ChatError::Embedding(_) | ChatError::Completion(_) => {
                error!(%err, "provider failure during chat turn");
                Self::new(StatusCode::BAD_GATEWAY, err.to_string())
            }
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::NotPdf(_) => Self::bad_request(err.to_string()),
            UploadError::Extraction(ref cause) => match cause {
                ExtractionError::Parse(_) => Self::bad_request(err.to_string()),
                ExtractionError::NoText => {
                    Self::new(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
                }
                ExtractionError::OcrUnavailable(_)
                | ExtractionError::OcrFailed(_)
                | ExtractionError::Io(_) => {
                    error!(%err, "extraction failure");
                    Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
                }
            },
            UploadError::Embedding(_) => {
                error!(%err, "provider failure during upload");
                Self::new(StatusCode::BAD_GATEWAY, err.to_string())
            }
            UploadError::Store(e) => e.into(),
        }
    }
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn chat_turn(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    let reply = state
        .chat
        .chat(request.conversation_id, &request.message)
        .await?;
    Ok(Json(reply))
}

pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadReceipt>, ApiError> {
    let mut file_bytes = None;
    let mut filename = None;
    let mut content_type = None;
    let mut conversation_id = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                filename = field.file_name().map(str::to_string);
                content_type = field.content_type().map(str::to_string);
                file_bytes = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::bad_request(e.to_string()))?,
                );
            }
            "conversation_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(e.to_string()))?;
                if !text.trim().is_empty() {
                    conversation_id = Some(
                        text.trim()
                            .parse::<i64>()
                            .map_err(|_| ApiError::bad_request("invalid conversation_id"))?,
                    );
                }
            }
            _ => {}
        }
    }

    let bytes = file_bytes.ok_or_else(|| ApiError::bad_request("missing file field"))?;
    let content_type = content_type.unwrap_or_default();
    if !PDF_CONTENT_TYPES.contains(&content_type.as_str()) {
        return Err(UploadError::NotPdf(content_type).into());
    }

    let filename = filename.unwrap_or_else(|| "document.pdf".to_string());
    let receipt = state
        .ingest
        .upload(&filename, &bytes, conversation_id)
        .await?;
    Ok(Json(receipt))
}

pub async fn list_conversations(
    State(state): State<AppState>,
) -> Result<Json<Vec<ConversationSummary>>, ApiError> {
    Ok(Json(state.store.list_conversations().await?))
}

pub async fn list_messages(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Message>>, ApiError> {
    state
        .store
        .get_conversation(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Conversation not found"))?;

    Ok(Json(state.store.list_messages(id).await?))
}
