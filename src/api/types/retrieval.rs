//! Retrieval API types

use serde::Serialize;

use crate::domain::document::DocType;
use crate::domain::retrieval::RetrievedChunk;

/// One retrieved chunk as returned to callers
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub id: String,
    /// Chunk content, with critical chunks highlighted
    pub content: String,
    pub section_title: String,
    pub doc_type: DocType,
    pub is_critical: bool,
    pub distance: f32,
    pub source: String,
}

impl From<RetrievedChunk> for QueryResult {
    fn from(hit: RetrievedChunk) -> Self {
        let content = hit.display_content();
        let source = hit.chunk.source().to_string();

        Self {
            id: hit.chunk.id,
            content,
            section_title: hit.chunk.section_title,
            doc_type: hit.chunk.doc_type,
            is_critical: hit.chunk.is_critical,
            distance: hit.distance,
            source,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    pub property_id: String,
    pub query: String,
    pub results: Vec<QueryResult>,
}
