//! Typed records for the upload, chat, and listing entry points.

use serde::{Deserialize, Serialize};

/// Where a document's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSource {
    /// Embedded text layer of the PDF.
    PdfText,
    /// Recognized from page images.
    Ocr,
}

impl std::fmt::Display for TextSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextSource::PdfText => write!(f, "pdf_text"),
            TextSource::Ocr => write!(f, "ocr"),
        }
    }
}

/// Outcome of a document upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub conversation_id: i64,
    pub num_chunks: usize,
    pub ocr_used: bool,
    pub pages_processed: u32,
    pub text_source: TextSource,
}

/// Body of a chat request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub conversation_id: Option<i64>,
    pub message: String,
}

/// Outcome of a chat turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub conversation_id: i64,
    pub answer: String,
}

/// One row of the conversation listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: i64,
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_source_wire_format() {
        assert_eq!(
            serde_json::to_string(&TextSource::PdfText).unwrap(),
            "\"pdf_text\""
        );
        assert_eq!(serde_json::to_string(&TextSource::Ocr).unwrap(), "\"ocr\"");
    }

    #[test]
    fn test_chat_request_conversation_id_optional() {
        let req: ChatRequest = serde_json::from_str(r#"{"message": "Hello"}"#).unwrap();
        assert!(req.conversation_id.is_none());
        assert_eq!(req.message, "Hello");
    }
}
