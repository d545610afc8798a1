//! Chunking strategy trait and configuration

use serde::Serialize;
use std::fmt::Debug;

use super::chunk::DocumentChunk;
use crate::domain::document::ParsedDocument;

/// Default target chunk size in characters
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Default overlap between consecutive chunks in characters
pub const DEFAULT_CHUNK_OVERLAP: usize = 50;

/// Smallest allowed chunk size
pub const MIN_CHUNK_SIZE: usize = 100;

/// Largest allowed chunk size
pub const MAX_CHUNK_SIZE: usize = 2000;

/// Configuration for chunking
///
/// Out-of-range values are clamped, never rejected: `chunk_size` into
/// `[MIN_CHUNK_SIZE, MAX_CHUNK_SIZE]` and `chunk_overlap` to at most half of
/// the clamped chunk size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChunkingConfig {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl ChunkingConfig {
    /// Create a new chunking configuration, clamping both values
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        let chunk_size = chunk_size.clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE);
        let chunk_overlap = chunk_overlap.min(chunk_size / 2);

        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Target maximum characters per chunk
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Characters of trailing context repeated at the start of the next chunk
    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Whether clamping changed the requested values
    pub fn adjusted_from(&self, chunk_size: usize, chunk_overlap: usize) -> bool {
        self.chunk_size != chunk_size || self.chunk_overlap != chunk_overlap
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP)
    }
}

/// Trait for chunking strategies
///
/// Implementations are pure: identical input and configuration give identical
/// output, and chunk order follows document order.
pub trait ChunkingStrategy: Send + Sync + Debug {
    /// Split a parsed document into chunks
    fn chunk_document(
        &self,
        document: &ParsedDocument,
        property_id: &str,
        ingestion_id: &str,
    ) -> Vec<DocumentChunk>;

    /// Configuration in effect after clamping
    fn config(&self) -> ChunkingConfig;

    /// Get the strategy name
    fn name(&self) -> &'static str;
}

/// Helper functions for chunking
pub mod helpers {
    /// Number of leading characters searched for an echoed section title
    pub const TITLE_SCAN_CHARS: usize = 100;

    /// Length in characters
    pub fn char_len(text: &str) -> usize {
        text.chars().count()
    }

    /// The last `n` characters of `text` (all of it when shorter)
    pub fn tail_chars(text: &str, n: usize) -> &str {
        let len = char_len(text);

        if len <= n {
            return text;
        }

        let start = text
            .char_indices()
            .nth(len - n)
            .map(|(idx, _)| idx)
            .unwrap_or(0);

        &text[start..]
    }

    /// Prefix content with `[title]\n` unless the title already appears in
    /// its first characters (case-insensitive)
    pub fn format_with_title(section_title: &str, content: &str) -> String {
        if section_title.is_empty() {
            return content.to_string();
        }

        let head: String = content.chars().take(TITLE_SCAN_CHARS).collect();

        if head.to_lowercase().contains(&section_title.to_lowercase()) {
            content.to_string()
        } else {
            format!("[{}]\n{}", section_title, content)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::ParsedSection;

    #[test]
    fn test_chunking_config_default() {
        let config = ChunkingConfig::default();
        assert_eq!(config.chunk_size(), 500);
        assert_eq!(config.chunk_overlap(), 50);
    }

    #[test]
    fn test_chunk_size_clamped() {
        assert_eq!(ChunkingConfig::new(10, 0).chunk_size(), MIN_CHUNK_SIZE);
        assert_eq!(ChunkingConfig::new(50_000, 0).chunk_size(), MAX_CHUNK_SIZE);
        assert_eq!(ChunkingConfig::new(800, 0).chunk_size(), 800);
    }

    #[test]
    fn test_overlap_clamped_to_half_chunk_size() {
        let config = ChunkingConfig::new(500, 9000);
        assert_eq!(config.chunk_overlap(), 250);

        let config = ChunkingConfig::new(50, 9000);
        assert_eq!(config.chunk_size(), 100);
        assert_eq!(config.chunk_overlap(), 50);
    }

    #[test]
    fn test_adjusted_from() {
        assert!(!ChunkingConfig::new(500, 50).adjusted_from(500, 50));
        assert!(ChunkingConfig::new(500, 9000).adjusted_from(500, 9000));
    }

    #[test]
    fn test_tail_chars() {
        assert_eq!(helpers::tail_chars("hello world", 5), "world");
        assert_eq!(helpers::tail_chars("hi", 5), "hi");
        assert_eq!(helpers::tail_chars("café olé", 3), "olé");
    }

    #[test]
    fn test_char_len_counts_characters() {
        assert_eq!(helpers::char_len("señor"), 5);
    }

    #[test]
    fn test_format_with_title_prefixes() {
        let formatted = helpers::format_with_title("Wifi", "Network name is beach-house.");
        assert_eq!(formatted, "[Wifi]\nNetwork name is beach-house.");
    }

    #[test]
    fn test_format_with_title_skips_echoed_title() {
        let content = "WIFI: network name is beach-house.";
        assert_eq!(helpers::format_with_title("Wifi", content), content);
    }

    #[test]
    fn test_format_with_title_only_checks_first_chars() {
        let content = format!("{} parking", "x".repeat(120));
        let formatted = helpers::format_with_title("Parking", &content);
        assert!(formatted.starts_with("[Parking]\n"));
    }

    #[test]
    fn test_format_with_title_is_idempotent() {
        let once = helpers::format_with_title("Pool", "Open from 9 to 5.");
        let twice = helpers::format_with_title("Pool", &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_format_with_empty_title() {
        assert_eq!(helpers::format_with_title("", "body"), "body");
    }

    #[test]
    fn test_mock_chunking_strategy() {
        let strategy = mock::MockChunkingStrategy::new();
        let document = ParsedDocument::new("Manual")
            .with_source_filename("manual.md")
            .with_section(ParsedSection::new("Wifi", "Network: beach", 1))
            .with_section(ParsedSection::new("Empty", "   ", 1));

        let chunks = strategy.chunk_document(&document, "prop", "ing_1");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].total_chunks, 1);
        assert_eq!(strategy.name(), "mock");
    }
}
