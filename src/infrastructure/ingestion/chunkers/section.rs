//! Section-aware document chunker

use tracing::{debug, trace};

use super::splitter::TextSplitter;
use crate::domain::document::{ParsedDocument, ParsedSection};
use crate::domain::ingestion::chunker::helpers::{char_len, format_with_title};
use crate::domain::ingestion::{
    chunk_id, ChunkMetadata, ChunkingConfig, ChunkingStrategy, DocumentChunk,
};

/// Chunking strategy that keeps every chunk inside one section
///
/// Short sections become a single chunk. Longer ones are split by
/// `TextSplitter`, with overlap confined to the section. Chunk indexes run
/// across the whole document.
#[derive(Debug, Clone, Copy)]
pub struct SectionChunker {
    config: ChunkingConfig,
    splitter: TextSplitter,
}

impl SectionChunker {
    /// Create a new section chunker
    pub fn new(config: ChunkingConfig) -> Self {
        Self {
            config,
            splitter: TextSplitter::new(config),
        }
    }

    /// Build from requested settings, logging when they had to be clamped
    pub fn from_requested(chunk_size: usize, chunk_overlap: usize) -> Self {
        let config = ChunkingConfig::new(chunk_size, chunk_overlap);

        if config.adjusted_from(chunk_size, chunk_overlap) {
            debug!(
                requested_size = chunk_size,
                requested_overlap = chunk_overlap,
                chunk_size = config.chunk_size(),
                chunk_overlap = config.chunk_overlap(),
                "Chunking configuration adjusted"
            );
        }

        Self::new(config)
    }

    fn build_chunk(
        &self,
        document: &ParsedDocument,
        section: &ParsedSection,
        property_id: &str,
        index: usize,
        content: &str,
        metadata: ChunkMetadata,
    ) -> DocumentChunk {
        DocumentChunk {
            id: chunk_id(property_id, &metadata.ingestion_id, index),
            content: format_with_title(&section.title, content),
            section_title: section.title.clone(),
            doc_type: document.doc_type,
            language: document.language.clone(),
            is_critical: section.is_critical,
            source_url: document.source_url.clone(),
            source_filename: document.source_filename.clone(),
            property_id: property_id.to_string(),
            chunk_index: index,
            total_chunks: 0,
            metadata,
        }
    }
}

impl Default for SectionChunker {
    fn default() -> Self {
        Self::new(ChunkingConfig::default())
    }
}

impl ChunkingStrategy for SectionChunker {
    fn chunk_document(
        &self,
        document: &ParsedDocument,
        property_id: &str,
        ingestion_id: &str,
    ) -> Vec<DocumentChunk> {
        let mut chunks: Vec<DocumentChunk> = Vec::new();

        for section in &document.sections {
            let content = section.content.trim();

            if content.is_empty() {
                trace!(section = %section.title, "Skipping empty section");
                continue;
            }

            let metadata = ChunkMetadata::new(ingestion_id, &document.title, section.level);

            if char_len(content) <= self.config.chunk_size() {
                let index = chunks.len();
                chunks.push(self.build_chunk(
                    document,
                    section,
                    property_id,
                    index,
                    content,
                    metadata,
                ));
                continue;
            }

            let parts = self.splitter.split(content);
            let total_parts = parts.len();

            for (i, part) in parts.iter().enumerate() {
                let index = chunks.len();
                chunks.push(self.build_chunk(
                    document,
                    section,
                    property_id,
                    index,
                    part,
                    metadata.clone().with_part(i + 1, total_parts),
                ));
            }
        }

        let total = chunks.len();
        for chunk in &mut chunks {
            chunk.total_chunks = total;
        }

        chunks
    }

    fn config(&self) -> ChunkingConfig {
        self.config
    }

    fn name(&self) -> &'static str {
        "section"
    }
}
