//! Recursive text chunking with configurable size and overlap

use crate::config::ChunkingConfig;
use crate::types::{Chunk, SourceDocument};

/// Separator hierarchy, largest semantic boundary first: paragraph breaks,
/// then line breaks, then word boundaries.
const SEPARATORS: [&str; 3] = ["\n\n", "\n", " "];

/// Text chunker with configurable size and overlap
///
/// Splits each document independently: a segment longer than `chunk_size`
/// recurses to the next smaller separator; adjacent small segments merge
/// greedily back into chunks of at most `chunk_size`. Consecutive chunks of
/// the same document overlap by up to `chunk_overlap` trailing bytes of the
/// previous chunk. A whitespace-free token longer than `chunk_size` is kept
/// unsplit.
pub struct TextChunker {
    /// Target chunk size in bytes
    chunk_size: usize,
    /// Overlap between consecutive chunks
    chunk_overlap: usize,
}

impl TextChunker {
    /// Create a new chunker; `chunk_overlap` must be smaller than `chunk_size`
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        debug_assert!(chunk_overlap < chunk_size);
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Create a chunker from configuration
    pub fn from_config(config: &ChunkingConfig) -> Self {
        Self::new(config.chunk_size, config.chunk_overlap)
    }

    /// Split a batch of documents, preserving document order then
    /// intra-document chunk order. Metadata is inherited unchanged; chunk
    /// indices restart at zero for each document.
    pub fn split_documents(&self, documents: &[SourceDocument]) -> Vec<Chunk> {
        let mut chunks = Vec::new();

        for doc in documents {
            for (idx, piece) in self.split_text(&doc.content).into_iter().enumerate() {
                chunks.push(Chunk::new(piece, doc.metadata.clone(), idx as u32));
            }
        }

        chunks
    }

    /// Split one text into overlapping chunks.
    ///
    /// Text that already fits in a single chunk is returned unmodified;
    /// empty or whitespace-only text yields no chunks.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        if text.len() <= self.chunk_size {
            return vec![text.to_string()];
        }

        let pieces = self.split_recursive(text, &SEPARATORS);
        self.merge_pieces(pieces)
    }

    /// Split on the largest boundary available, recursing to smaller
    /// boundaries only for segments that still exceed the chunk size.
    /// Separators stay attached to the preceding segment so concatenating
    /// the pieces reproduces the input exactly.
    fn split_recursive(&self, text: &str, separators: &[&str]) -> Vec<String> {
        if text.len() <= self.chunk_size {
            return vec![text.to_string()];
        }

        let Some((sep, rest)) = separators.split_first() else {
            // Irreducible unit larger than the limit: preserve it unsplit.
            return vec![text.to_string()];
        };

        if !text.contains(sep) {
            return self.split_recursive(text, rest);
        }

        let mut pieces = Vec::new();
        for segment in text.split_inclusive(sep) {
            if segment.len() <= self.chunk_size {
                pieces.push(segment.to_string());
            } else {
                pieces.extend(self.split_recursive(segment, rest));
            }
        }
        pieces
    }

    /// Merge adjacent pieces into chunks of at most `chunk_size`, carrying
    /// the trailing overlap of each emitted chunk into the next one.
    fn merge_pieces(&self, pieces: Vec<String>) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();

        for piece in pieces {
            if !current.is_empty() && current.len() + piece.len() > self.chunk_size {
                let overlap = self.overlap_tail(&current);
                chunks.push(std::mem::take(&mut current));

                // Skip the carried overlap when it would push this chunk
                // over the limit on its own.
                if overlap.len() + piece.len() <= self.chunk_size {
                    current = overlap;
                }
            }
            current.push_str(&piece);
        }

        if !current.is_empty() {
            chunks.push(current);
        }

        chunks
    }

    /// Trailing overlap of a chunk, aligned to a character boundary
    fn overlap_tail(&self, text: &str) -> String {
        if self.chunk_overlap == 0 {
            return String::new();
        }
        if text.len() <= self.chunk_overlap {
            return text.to_string();
        }

        let mut start = text.len() - self.chunk_overlap;
        while start > 0 && !text.is_char_boundary(start) {
            start -= 1;
        }
        text[start..].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DocumentMetadata, FileType};

    fn words(count: usize) -> String {
        (0..count)
            .map(|i| format!("w{:04}", i))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn short_text_yields_one_identical_chunk() {
        let chunker = TextChunker::new(1000, 100);
        let text = "A short paragraph.\n\nAnd a second one.";
        assert_eq!(chunker.split_text(text), vec![text.to_string()]);
    }

    #[test]
    fn whitespace_only_text_yields_no_chunks() {
        let chunker = TextChunker::new(1000, 100);
        assert!(chunker.split_text("").is_empty());
        assert!(chunker.split_text("   \n\n  \n").is_empty());
    }

    #[test]
    fn no_chunk_is_empty_or_oversize() {
        let chunker = TextChunker::new(100, 20);
        let text = words(200);

        let chunks = chunker.split_text(&text);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(!chunk.is_empty());
            assert!(chunk.len() <= 100, "oversize chunk: {} bytes", chunk.len());
        }
    }

    #[test]
    fn irreducible_token_is_preserved_unsplit() {
        let chunker = TextChunker::new(50, 10);
        let long_token = "x".repeat(120);
        let text = format!("{} {}\n\nshort tail", words(20), long_token);

        let chunks = chunker.split_text(&text);
        assert!(chunks.iter().any(|c| c.contains(&long_token)));
        for chunk in &chunks {
            assert!(!chunk.is_empty());
        }
    }

    #[test]
    fn consecutive_chunks_overlap() {
        let chunker = TextChunker::new(100, 30);
        let chunks = chunker.split_text(&words(120));

        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            let shared = (1..=prev.len().min(next.len()))
                .rev()
                .find(|&n| next.as_bytes().starts_with(&prev.as_bytes()[prev.len() - n..]))
                .unwrap_or(0);
            assert!(shared > 0, "no overlap between {:?} and {:?}", prev, next);
        }
    }

    #[test]
    fn stripping_overlap_reconstructs_the_original() {
        let chunker = TextChunker::new(100, 25);
        let text = format!("{}\n\n{}\n{}", words(60), words(60), words(60));

        let chunks = chunker.split_text(&text);
        assert!(chunks.len() > 1);

        let mut rebuilt = chunks[0].clone();
        for pair in chunks.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            // Word ids are unique, so the longest shared region is exactly
            // the carried overlap.
            let shared = (0..=prev.len().min(next.len()))
                .rev()
                .find(|&n| next.as_bytes().starts_with(&prev.as_bytes()[prev.len() - n..]))
                .unwrap_or(0);
            rebuilt.push_str(&next[shared..]);
        }

        assert_eq!(rebuilt, text);
    }

    #[test]
    fn zero_overlap_partitions_the_text() {
        let chunker = TextChunker::new(80, 0);
        let text = words(100);

        let chunks = chunker.split_text(&text);
        assert!(chunks.len() > 1);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn documents_are_split_independently() {
        let chunker = TextChunker::new(100, 20);
        let docs = vec![
            SourceDocument::new(
                words(60),
                DocumentMetadata::new("/docs/a.md", None, FileType::Markdown),
            ),
            SourceDocument::new(
                "tiny".to_string(),
                DocumentMetadata::new("/docs/b.json", Some(1), FileType::Json),
            ),
        ];

        let chunks = chunker.split_documents(&docs);

        let a_chunks: Vec<_> = chunks
            .iter()
            .filter(|c| c.metadata.source.ends_with("a.md"))
            .collect();
        let b_chunks: Vec<_> = chunks
            .iter()
            .filter(|c| c.metadata.source.ends_with("b.json"))
            .collect();

        assert!(a_chunks.len() > 1);
        assert_eq!(b_chunks.len(), 1);
        assert_eq!(b_chunks[0].content, "tiny");

        // Chunk indices restart per document, and document order is stable.
        for (idx, chunk) in a_chunks.iter().enumerate() {
            assert_eq!(chunk.chunk_index, idx as u32);
        }
        assert_eq!(b_chunks[0].chunk_index, 0);
        let first_b = chunks
            .iter()
            .position(|c| c.metadata.source.ends_with("b.json"))
            .unwrap();
        assert_eq!(first_b, chunks.len() - 1);
    }

    #[test]
    fn empty_document_yields_no_chunks() {
        let chunker = TextChunker::new(100, 20);
        let docs = vec![SourceDocument::new(
            String::new(),
            DocumentMetadata::new("/docs/empty.md", None, FileType::Markdown),
        )];
        assert!(chunker.split_documents(&docs).is_empty());
    }
}
