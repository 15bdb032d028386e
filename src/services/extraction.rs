//! PDF text extraction with OCR fallback.

use std::io::ErrorKind;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::ExtractionError;
use crate::models::{ExtractionConfig, TextSource};

/// Extraction outcome, tagged by where the text came from.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub text: String,
    pub pages_processed: u32,
    pub source: TextSource,
}

impl ExtractedDocument {
    pub fn ocr_used(&self) -> bool {
        self.source == TextSource::Ocr
    }
}

/// Turns document bytes into text, tagged by how the text was obtained.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, bytes: &[u8]) -> Result<ExtractedDocument, ExtractionError>;
}

/// Extracts text from PDF bytes, falling back to a local OCR pass when the
/// document has no embedded text layer.
#[derive(Debug, Clone)]
pub struct PdfExtractor {
    enable_ocr: bool,
    ocr_languages: Vec<String>,
}

impl PdfExtractor {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            enable_ocr: config.enable_ocr,
            ocr_languages: config.ocr_languages.clone(),
        }
    }

    /// Run `ocrmypdf` over the document and collect its sidecar text.
    async fn run_ocr(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("input.pdf");
        let output = dir.path().join("output.pdf");
        let sidecar = dir.path().join("sidecar.txt");
        tokio::fs::write(&input, bytes).await?;

        let result = Command::new("ocrmypdf")
            .arg("--force-ocr")
            .arg("--language")
            .arg(self.ocr_languages.join("+"))
            .arg("--sidecar")
            .arg(&sidecar)
            .arg(&input)
            .arg(&output)
            .output()
            .await;

        match result {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ExtractionError::OcrUnavailable("ocrmypdf".to_string()))
            }
            Err(e) => Err(ExtractionError::Io(e)),
            Ok(out) if !out.status.success() => Err(ExtractionError::OcrFailed(
                String::from_utf8_lossy(&out.stderr).trim().to_string(),
            )),
            Ok(_) => Ok(tokio::fs::read_to_string(&sidecar).await?),
        }
    }
}

#[async_trait]
impl TextExtractor for PdfExtractor {
    /// Scanned documents without an embedded text layer go through OCR when
    /// enabled; a document yielding no text from either path is an error.
    async fn extract(&self, bytes: &[u8]) -> Result<ExtractedDocument, ExtractionError> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| ExtractionError::Parse(e.to_string()))?;
        let pages_processed = pages.len() as u32;
        let text = pages.join("\n");

        if has_text(&text) {
            debug!(pages = pages_processed, "extracted embedded PDF text");
            return Ok(ExtractedDocument {
                text,
                pages_processed,
                source: TextSource::PdfText,
            });
        }

        if !self.enable_ocr {
            return Err(ExtractionError::NoText);
        }

        warn!(pages = pages_processed, "no embedded text, running OCR");
        let text = self.run_ocr(bytes).await?;
        if !has_text(&text) {
            return Err(ExtractionError::NoText);
        }

        Ok(ExtractedDocument {
            text,
            pages_processed,
            source: TextSource::Ocr,
        })
    }
}

/// True when the text has any non-whitespace content.
fn has_text(text: &str) -> bool {
    text.chars().any(|c| !c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_text() {
        assert!(!has_text(""));
        assert!(!has_text(" \n\t \n"));
        assert!(has_text("a"));
        assert!(has_text("\n\n word \n"));
    }

    #[test]
    fn test_ocr_used_tagging() {
        let direct = ExtractedDocument {
            text: "text".to_string(),
            pages_processed: 2,
            source: TextSource::PdfText,
        };
        assert!(!direct.ocr_used());

        let scanned = ExtractedDocument {
            source: TextSource::Ocr,
            ..direct
        };
        assert!(scanned.ocr_used());
    }

    #[tokio::test]
    async fn test_garbage_bytes_fail_parse() {
        let extractor = PdfExtractor::new(&ExtractionConfig::default());
        let err = extractor.extract(b"not a pdf").await.unwrap_err();
        assert!(matches!(err, ExtractionError::Parse(_)));
    }
}
