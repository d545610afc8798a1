//! Document chunk produced for embedding and storage

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::document::DocType;

/// Build a chunk identifier: `{property_id}_{ingestion_id}_{index:04}`
///
/// Padding grows naturally past 9999.
pub fn chunk_id(property_id: &str, ingestion_id: &str, index: usize) -> String {
    format!("{}_{}_{:04}", property_id, ingestion_id, index)
}

/// Provenance metadata attached to every chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Ingestion run that produced the chunk
    pub ingestion_id: String,
    /// Title of the parent document
    pub document_title: String,
    /// Heading depth of the source section
    pub section_level: u8,
    /// 1-based part number when the section was split
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_part: Option<usize>,
    /// Number of parts the section was split into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_parts: Option<usize>,
}

impl ChunkMetadata {
    /// Metadata for a section emitted whole
    pub fn new(
        ingestion_id: impl Into<String>,
        document_title: impl Into<String>,
        section_level: u8,
    ) -> Self {
        Self {
            ingestion_id: ingestion_id.into(),
            document_title: document_title.into(),
            section_level,
            chunk_part: None,
            section_parts: None,
        }
    }

    /// Mark this chunk as part `part` (1-based) of `parts`
    pub fn with_part(mut self, part: usize, parts: usize) -> Self {
        self.chunk_part = Some(part);
        self.section_parts = Some(parts);
        self
    }

    /// Convert to JSON value map
    pub fn to_json_map(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert(
            "ingestion_id".to_string(),
            serde_json::Value::String(self.ingestion_id.clone()),
        );
        map.insert(
            "document_title".to_string(),
            serde_json::Value::String(self.document_title.clone()),
        );
        map.insert(
            "section_level".to_string(),
            serde_json::Value::Number(self.section_level.into()),
        );

        if let (Some(part), Some(parts)) = (self.chunk_part, self.section_parts) {
            map.insert("chunk_part".to_string(), serde_json::Value::Number(part.into()));
            map.insert(
                "section_parts".to_string(),
                serde_json::Value::Number(parts.into()),
            );
        }

        map
    }
}

/// A bounded excerpt of document text, ready to embed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: String,
    /// Exact string to embed
    pub content: String,
    pub section_title: String,
    pub doc_type: DocType,
    pub language: String,
    pub is_critical: bool,
    pub source_url: String,
    pub source_filename: String,
    pub property_id: String,
    /// Position across the whole document, starting at 0
    pub chunk_index: usize,
    /// Chunk count for the whole document
    pub total_chunks: usize,
    pub metadata: ChunkMetadata,
}

impl DocumentChunk {
    /// The URL when present, otherwise the filename
    pub fn source(&self) -> &str {
        if self.source_url.is_empty() {
            &self.source_filename
        } else {
            &self.source_url
        }
    }

    /// Whether the chunk came from a section that was split
    pub fn is_partial(&self) -> bool {
        self.metadata.chunk_part.is_some()
    }
}
