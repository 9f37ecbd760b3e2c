use tracing::debug;

use crate::schema::{Document, TextChunk};
use crate::traits::TextSplitter;
use crate::Result;

use super::chunk::ChunkConfig;

/// Text splitter that recursively splits on a priority list of separators.
///
/// The first separator present in the text is used; any resulting piece that
/// is still longer than the chunk size is split again with the remaining
/// separators, down to a character-by-character split. Separators are kept
/// attached to the preceding piece so that reassembling the pieces yields the
/// original text.
pub struct RecursiveCharacterTextSplitter {
    /// Size configuration for chunks
    config: ChunkConfig,
    /// List of separator strings, ordered by priority
    separators: Vec<String>,
}

impl Default for RecursiveCharacterTextSplitter {
    fn default() -> Self {
        Self {
            config: ChunkConfig::default(),
            separators: vec![
                "\n\n".to_string(),
                "\n".to_string(),
                ". ".to_string(),
                " ".to_string(),
                "".to_string(),
            ],
        }
    }
}

impl RecursiveCharacterTextSplitter {
    /// Create a new text splitter with the default separators
    pub fn new(config: ChunkConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Create a new text splitter from raw size parameters
    pub fn with_chunk_size(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        Ok(Self::new(ChunkConfig::new(chunk_size, chunk_overlap)?))
    }

    /// Replace the separator priority list
    pub fn with_separators(mut self, separators: Vec<String>) -> Self {
        self.separators = separators;
        self
    }

    /// Split text on the first available separator, recursing into pieces
    /// that still exceed the chunk size
    fn split_with_separators(&self, text: &str, separators: &[String]) -> Vec<String> {
        let Some((separator, rest)) = separators.split_first() else {
            return vec![text.to_string()];
        };

        if separator.is_empty() {
            // Last resort: split by character
            return text.chars().map(|c| c.to_string()).collect();
        }

        if !text.contains(separator.as_str()) {
            return self.split_with_separators(text, rest);
        }

        let mut pieces = Vec::new();
        for part in text.split_inclusive(separator.as_str()) {
            if part.chars().count() > self.config.chunk_size {
                pieces.extend(self.split_with_separators(part, rest));
            } else {
                pieces.push(part.to_string());
            }
        }
        pieces
    }

    /// Merge pieces greedily up to the chunk size, seeding each new chunk
    /// with trailing pieces of the previous one up to the overlap budget
    fn merge_pieces(&self, pieces: Vec<String>) -> Vec<String> {
        let mut chunks: Vec<String> = Vec::new();
        let mut current: Vec<String> = Vec::new();
        let mut current_length = 0;

        for piece in pieces {
            let piece_length = piece.chars().count();

            if current_length + piece_length > self.config.chunk_size && !current.is_empty() {
                chunks.push(current.concat());

                // Carry over the trailing pieces that fit within the overlap
                let mut overlap_length = 0;
                let mut overlap_pieces: Vec<String> = Vec::new();

                for prev in current.iter().rev() {
                    let prev_length = prev.chars().count();
                    if overlap_length + prev_length > self.config.chunk_overlap {
                        break;
                    }
                    overlap_length += prev_length;
                    overlap_pieces.insert(0, prev.clone());
                }

                current = overlap_pieces;
                current_length = overlap_length;
            }

            current.push(piece);
            current_length += piece_length;
        }

        if !current.is_empty() {
            chunks.push(current.concat());
        }

        chunks.into_iter().filter(|c| !c.is_empty()).collect()
    }
}

impl TextSplitter for RecursiveCharacterTextSplitter {
    fn split_text(&self, text: &str) -> Result<Vec<String>> {
        let pieces = self.split_with_separators(text, &self.separators);
        Ok(self.merge_pieces(pieces))
    }

    fn split_documents(&self, documents: Vec<Document>) -> Result<Vec<TextChunk>> {
        let mut result = Vec::new();

        for doc in documents {
            let texts = self.split_text(&doc.page_content)?;
            debug!(
                origin_url = %doc.metadata.origin_url,
                chunks = texts.len(),
                "split document"
            );

            for text in texts {
                result.push(TextChunk::new(text, doc.metadata.clone()));
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{SourceKind, SourceMetadata};

    fn splitter(chunk_size: usize, chunk_overlap: usize) -> RecursiveCharacterTextSplitter {
        RecursiveCharacterTextSplitter::with_chunk_size(chunk_size, chunk_overlap).unwrap()
    }

    #[test]
    fn test_short_text_yields_single_chunk() {
        let chunks = splitter(1000, 200).split_text("short text").unwrap();
        assert_eq!(chunks, vec!["short text".to_string()]);
    }

    #[test]
    fn test_text_exactly_at_chunk_size() {
        let text = "x".repeat(1000);
        let chunks = splitter(1000, 200).split_text(&text).unwrap();
        assert_eq!(chunks, vec![text]);
    }

    #[test]
    fn test_unbroken_text_chunk_boundaries() {
        // 2500 characters with no separators at all: pieces are single
        // characters, so chunk boundaries land exactly at size/overlap.
        let text = "x".repeat(2500);
        let chunks = splitter(1000, 200).split_text(&text).unwrap();

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 1000);
        assert_eq!(chunks[1].len(), 1000);
        assert_eq!(chunks[2].len(), 900);
    }

    #[test]
    fn test_overlap_repeats_tail_of_previous_chunk() {
        let text: String = (0..2500)
            .map(|i| char::from(b'a' + (i % 26) as u8))
            .collect();
        let chunks = splitter(1000, 200).split_text(&text).unwrap();

        assert_eq!(chunks.len(), 3);
        // Each chunk after the first begins with the final 200 characters of
        // the previous chunk's source region.
        assert_eq!(chunks[1][..200], chunks[0][800..]);
        assert_eq!(chunks[2][..200], chunks[1][800..]);
        assert_eq!(chunks[1], text[800..1800]);
        assert_eq!(chunks[2], text[1600..2500]);
    }

    #[test]
    fn test_every_chunk_within_size_limit() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(120);
        let chunks = splitter(1000, 200).split_text(&text).unwrap();

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(!chunk.is_empty());
            assert!(chunk.chars().count() <= 1000);
        }
    }

    #[test]
    fn test_chunks_cover_source_losslessly() {
        let text: String = (0..60)
            .map(|i| format!("Sentence number {i} of the sample text. "))
            .collect();
        let chunks = splitter(500, 100).split_text(&text).unwrap();

        // Every chunk is an in-order substring of the source; together the
        // non-overlapping portions cover the whole text.
        let mut search_from = 0;
        let mut covered_to = 0;
        for chunk in &chunks {
            let start = text[search_from..]
                .find(chunk.as_str())
                .map(|i| i + search_from)
                .expect("chunk not found in source text");
            assert!(start <= covered_to, "gap between consecutive chunks");
            covered_to = covered_to.max(start + chunk.len());
            search_from = start;
        }
        assert_eq!(covered_to, text.len());
        assert!(text.starts_with(chunks[0].as_str()));
    }

    #[test]
    fn test_prefers_paragraph_boundaries() {
        let text = format!("{}\n\n{}", "a".repeat(400), "b".repeat(400));
        let chunks = splitter(500, 100).split_text(&text).unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], format!("{}\n\n", "a".repeat(400)));
        assert_eq!(chunks[1], "b".repeat(400));
    }

    #[test]
    fn test_split_is_deterministic() {
        let text = "Sentence one. Sentence two. Sentence three. ".repeat(50);
        let splitter = splitter(300, 60);
        let first = splitter.split_text(&text).unwrap();
        let second = splitter.split_text(&text).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_split_documents_preserves_order_and_metadata() {
        let first = Document::new(
            "x".repeat(1500),
            SourceMetadata::new("https://example.com/a", SourceKind::WebPage),
        );
        let second = Document::new(
            "short transcript",
            SourceMetadata::new("https://youtu.be/abc123", SourceKind::Video),
        );

        let chunks = splitter(1000, 200)
            .split_documents(vec![first, second])
            .unwrap();

        assert!(chunks.len() >= 3);
        let last = chunks.last().unwrap();
        assert_eq!(last.text, "short transcript");
        assert_eq!(last.metadata.kind, SourceKind::Video);
        for chunk in &chunks[..chunks.len() - 1] {
            assert_eq!(chunk.metadata.origin_url, "https://example.com/a");
            assert_eq!(chunk.metadata.kind, SourceKind::WebPage);
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(RecursiveCharacterTextSplitter::with_chunk_size(200, 200).is_err());
        assert!(RecursiveCharacterTextSplitter::with_chunk_size(200, 500).is_err());
    }
}
