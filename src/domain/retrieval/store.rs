//! Chunk store trait and search types

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::document::DocType;
use crate::domain::error::DomainError;
use crate::domain::ingestion::DocumentChunk;

#[cfg(test)]
use mockall::automock;

/// Prefix shown before critical content
pub const IMPORTANT_MARKER: &str = "⚠️ IMPORTANT: ";

/// Query against a property's stored chunks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    pub property_id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_types: Option<Vec<DocType>>,
    pub limit: usize,
}

impl SearchQuery {
    pub fn new(property_id: impl Into<String>, text: impl Into<String>, limit: usize) -> Self {
        Self {
            property_id: property_id.into(),
            text: text.into(),
            language: None,
            doc_types: None,
            limit,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_doc_types(mut self, doc_types: Vec<DocType>) -> Self {
        self.doc_types = Some(doc_types);
        self
    }

    /// Whether a chunk passes the property, language and doc type filters
    pub fn accepts(&self, chunk: &DocumentChunk) -> bool {
        if chunk.property_id != self.property_id {
            return false;
        }

        if let Some(language) = &self.language {
            if &chunk.language != language {
                return false;
            }
        }

        if let Some(doc_types) = &self.doc_types {
            if !doc_types.is_empty() && !doc_types.contains(&chunk.doc_type) {
                return false;
            }
        }

        true
    }
}

/// A stored chunk matched by a search; lower distance is closer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievedChunk {
    pub chunk: DocumentChunk,
    pub distance: f32,
}

impl RetrievedChunk {
    pub fn new(chunk: DocumentChunk, distance: f32) -> Self {
        Self { chunk, distance }
    }

    /// Content as shown to a guest, with critical chunks highlighted
    pub fn display_content(&self) -> String {
        if self.chunk.is_critical {
            format!("{}{}", IMPORTANT_MARKER, self.chunk.content)
        } else {
            self.chunk.content.clone()
        }
    }
}

/// Result of replacing a property+source's chunks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplaceResult {
    pub deleted: usize,
    pub inserted: usize,
}

/// Summary of a property's stored chunks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PropertyStats {
    pub property_id: String,
    pub total_chunks: usize,
    pub doc_types: BTreeMap<String, usize>,
    pub languages: Vec<String>,
    pub critical_sections: usize,
}

/// Storage for embedded-ready chunks
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChunkStore: Send + Sync {
    /// Store chunks alongside any existing ones
    async fn insert(&self, chunks: Vec<DocumentChunk>) -> Result<usize, DomainError>;

    /// Delete a property+source's chunks, then store the new ones
    async fn replace_source(
        &self,
        property_id: &str,
        source_url: &str,
        source_filename: &str,
        chunks: Vec<DocumentChunk>,
    ) -> Result<ReplaceResult, DomainError>;

    /// Find chunks closest to the query, nearest first
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RetrievedChunk>, DomainError>;

    /// Summarize a property's chunks
    async fn stats(&self, property_id: &str) -> Result<PropertyStats, DomainError>;
}
