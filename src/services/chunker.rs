//! Paragraph-aligned text chunking.

use crate::models::ChunkingConfig;

/// Splits extracted document text into bounded, paragraph-aligned chunks.
///
/// The bound is a soft target: a single paragraph longer than `max_chars`
/// is emitted alone rather than split mid-paragraph.
#[derive(Debug, Clone)]
pub struct ParagraphChunker {
    max_chars: usize,
}

impl ParagraphChunker {
    /// Create a chunker with the given configuration.
    pub fn new(config: &ChunkingConfig) -> Self {
        Self {
            max_chars: config.max_chars,
        }
    }

    /// Create a chunker with default settings.
    pub fn with_defaults() -> Self {
        Self::new(&ChunkingConfig::default())
    }

    /// Chunk text into paragraph-aligned segments.
    ///
    /// Paragraphs are lines with surrounding whitespace trimmed; empty lines
    /// are dropped. Paragraphs accumulate greedily, counting one separator
    /// character per joined paragraph, and the buffer is flushed (joined with
    /// a single newline) whenever the next paragraph would push it past the
    /// bound. Order is preserved and no chunk is ever empty.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut current_len = 0usize;

        for para in text.lines().map(str::trim).filter(|p| !p.is_empty()) {
            if current_len + para.len() + 1 > self.max_chars && !current.is_empty() {
                chunks.push(current.join("\n"));
                current.clear();
                current_len = 0;
            }

            current_len += para.len() + 1;
            current.push(para);
        }

        if !current.is_empty() {
            chunks.push(current.join("\n"));
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunker(max_chars: usize) -> ParagraphChunker {
        ParagraphChunker::new(&ChunkingConfig { max_chars })
    }

    fn paragraphs_of(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(chunker(100).chunk("").is_empty());
        assert!(chunker(100).chunk("\n\n   \n").is_empty());
    }

    #[test]
    fn test_short_text_single_chunk() {
        let chunks = ParagraphChunker::with_defaults().chunk("First paragraph.\n\nSecond one.");
        assert_eq!(chunks, vec!["First paragraph.\nSecond one."]);
    }

    #[test]
    fn test_flush_on_bound() {
        let text = "aaaaaaaaaa\nbbbbbbbbbb\ncccccccccc";
        let chunks = chunker(22).chunk(text);
        assert_eq!(chunks, vec!["aaaaaaaaaa\nbbbbbbbbbb", "cccccccccc"]);
    }

    #[test]
    fn test_reconstruction_preserves_paragraphs() {
        let text = "alpha one\n\n  beta two  \ngamma three\n\ndelta four\nepsilon five";
        let chunks = chunker(25).chunk(text);

        let rejoined: Vec<String> = chunks
            .iter()
            .flat_map(|c| c.lines().map(str::to_string))
            .collect();
        assert_eq!(rejoined, paragraphs_of(text));
    }

    #[test]
    fn test_no_chunk_empty_and_bound_respected() {
        let text = (0..40)
            .map(|i| format!("paragraph number {}", i))
            .collect::<Vec<_>>()
            .join("\n");
        let max = 60;
        let chunks = chunker(max).chunk(&text);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(!chunk.is_empty());
            assert!(chunk.len() <= max, "chunk of {} chars exceeds bound", chunk.len());
        }
    }

    #[test]
    fn test_oversize_paragraph_emitted_alone() {
        let long = "x".repeat(500);
        let text = format!("short one\n{}\nshort two", long);
        let chunks = chunker(100).chunk(&text);

        assert_eq!(chunks, vec!["short one".to_string(), long, "short two".to_string()]);
    }

    #[test]
    fn test_idempotence() {
        let text = "one two three\nfour five six\nseven eight nine\nten eleven twelve";
        let c = chunker(30);

        let first = c.chunk(text);
        let rejoined = first.join("\n");
        let second = c.chunk(&rejoined);

        let flatten = |chunks: &[String]| -> Vec<String> {
            chunks
                .iter()
                .flat_map(|c| c.lines().map(str::to_string))
                .collect()
        };
        assert_eq!(flatten(&first), flatten(&second));
    }
}
