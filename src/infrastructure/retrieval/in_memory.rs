//! In-memory chunk store for development and testing
//!
//! Stands in for a vector database. Relevance is keyword overlap between the
//! query and the chunk content, expressed as a distance in `[0, 1)`.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ingestion::DocumentChunk;
use crate::domain::retrieval::{
    ChunkStore, PropertyStats, ReplaceResult, RetrievedChunk, SearchQuery,
};
use crate::domain::DomainError;

/// Terms shorter than this are ignored when scoring
const MIN_TERM_LENGTH: usize = 3;

/// In-memory chunk store keeping chunks in insertion order
#[derive(Debug, Default)]
pub struct InMemoryChunkStore {
    chunks: Arc<RwLock<Vec<DocumentChunk>>>,
}

impl InMemoryChunkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.chunks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.chunks.read().await.is_empty()
    }
}

/// Lowercased, de-duplicated alphanumeric terms
fn terms(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= MIN_TERM_LENGTH)
        .map(str::to_lowercase)
        .collect()
}

/// Distance for a chunk, or `None` when no query term matches
fn distance(query_terms: &BTreeSet<String>, chunk: &DocumentChunk) -> Option<f32> {
    if query_terms.is_empty() {
        return None;
    }

    let chunk_terms = terms(&chunk.content);
    let matched = query_terms.intersection(&chunk_terms).count();

    if matched == 0 {
        return None;
    }

    Some(1.0 - matched as f32 / query_terms.len() as f32)
}

fn same_source(chunk: &DocumentChunk, property_id: &str, url: &str, filename: &str) -> bool {
    chunk.property_id == property_id && chunk.source_url == url && chunk.source_filename == filename
}

#[async_trait]
impl ChunkStore for InMemoryChunkStore {
    async fn insert(&self, chunks: Vec<DocumentChunk>) -> Result<usize, DomainError> {
        let mut stored = self.chunks.write().await;
        let count = chunks.len();
        stored.extend(chunks);
        Ok(count)
    }

    async fn replace_source(
        &self,
        property_id: &str,
        source_url: &str,
        source_filename: &str,
        chunks: Vec<DocumentChunk>,
    ) -> Result<ReplaceResult, DomainError> {
        let mut stored = self.chunks.write().await;
        let before = stored.len();

        stored.retain(|c| !same_source(c, property_id, source_url, source_filename));

        let deleted = before - stored.len();
        let inserted = chunks.len();
        stored.extend(chunks);

        debug!(
            property_id = %property_id,
            deleted = deleted,
            inserted = inserted,
            "Replaced chunks for source"
        );

        Ok(ReplaceResult { deleted, inserted })
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<RetrievedChunk>, DomainError> {
        let stored = self.chunks.read().await;
        let query_terms = terms(&query.text);

        let mut hits: Vec<RetrievedChunk> = stored
            .iter()
            .filter(|chunk| query.accepts(chunk))
            .filter_map(|chunk| {
                distance(&query_terms, chunk).map(|d| RetrievedChunk::new(chunk.clone(), d))
            })
            .collect();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits.truncate(query.limit);

        Ok(hits)
    }

    async fn stats(&self, property_id: &str) -> Result<PropertyStats, DomainError> {
        let stored = self.chunks.read().await;

        let mut doc_types: BTreeMap<String, usize> = BTreeMap::new();
        let mut languages: BTreeSet<String> = BTreeSet::new();
        let mut total_chunks = 0;
        let mut critical_sections = 0;

        for chunk in stored.iter().filter(|c| c.property_id == property_id) {
            total_chunks += 1;
            *doc_types.entry(chunk.doc_type.as_str().to_string()).or_insert(0) += 1;
            languages.insert(chunk.language.clone());

            if chunk.is_critical {
                critical_sections += 1;
            }
        }

        Ok(PropertyStats {
            property_id: property_id.to_string(),
            total_chunks,
            doc_types,
            languages: languages.into_iter().collect(),
            critical_sections,
        })
    }
}
