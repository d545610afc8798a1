//! Retrieval service: chunk search with critical-section boosting

use std::fmt::{self, Debug};
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::domain::document::DocType;
use crate::domain::error::DomainError;
use crate::domain::ingestion::validate_property_id;
use crate::domain::retrieval::{
    apply_critical_boost, candidate_limit, ChunkStore, PropertyStats, RetrievedChunk,
    SearchQuery, DEFAULT_CRITICAL_BOOST,
};

/// Default number of results per query
pub const DEFAULT_RESULT_LIMIT: usize = 5;

/// Upper bound on results per query
pub const MAX_RESULT_LIMIT: usize = 100;

/// Retrieval service configuration
#[derive(Debug, Clone, Copy)]
pub struct RetrievalConfig {
    /// Distance multiplier applied to critical chunks
    pub critical_boost: f32,
    pub default_limit: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            critical_boost: DEFAULT_CRITICAL_BOOST,
            default_limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

/// A guest question against one property
#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalRequest {
    pub property_id: String,
    pub query: String,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub doc_types: Option<Vec<DocType>>,
    #[serde(default = "default_boost")]
    pub boost_critical: bool,
}

fn default_boost() -> bool {
    true
}

impl RetrievalRequest {
    pub fn new(property_id: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            property_id: property_id.into(),
            query: query.into(),
            limit: None,
            language: None,
            doc_types: None,
            boost_critical: true,
        }
    }
}

/// Trait for the retrieval service (for dynamic dispatch in AppState)
#[async_trait]
pub trait RetrievalServiceTrait: Send + Sync + Debug {
    /// Retrieve the chunks most relevant to a question, nearest first
    async fn retrieve(&self, request: RetrievalRequest)
        -> Result<Vec<RetrievedChunk>, DomainError>;

    /// Summarize a property's stored chunks
    async fn stats(&self, property_id: &str) -> Result<PropertyStats, DomainError>;
}

/// Retrieval service implementation
pub struct RetrievalService {
    store: Arc<dyn ChunkStore>,
    config: RetrievalConfig,
}

impl Debug for RetrievalService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetrievalService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RetrievalService {
    pub fn new(store: Arc<dyn ChunkStore>) -> Self {
        Self::with_config(store, RetrievalConfig::default())
    }

    pub fn with_config(store: Arc<dyn ChunkStore>, config: RetrievalConfig) -> Self {
        Self { store, config }
    }
}

#[async_trait]
impl RetrievalServiceTrait for RetrievalService {
    #[instrument(skip(self, request), fields(property_id = %request.property_id))]
    async fn retrieve(
        &self,
        request: RetrievalRequest,
    ) -> Result<Vec<RetrievedChunk>, DomainError> {
        validate_property_id(&request.property_id)?;

        if request.query.trim().is_empty() {
            return Err(DomainError::validation("query cannot be empty"));
        }

        let stats = self.store.stats(&request.property_id).await?;
        if stats.total_chunks == 0 {
            return Err(DomainError::not_found(format!(
                "No documents ingested for property '{}'",
                request.property_id
            )));
        }

        let limit = request
            .limit
            .unwrap_or(self.config.default_limit)
            .clamp(1, MAX_RESULT_LIMIT);
        let mut query = SearchQuery::new(
            &request.property_id,
            &request.query,
            candidate_limit(limit, request.boost_critical),
        );

        if let Some(language) = request.language {
            query = query.with_language(language);
        }

        if let Some(doc_types) = request.doc_types {
            query = query.with_doc_types(doc_types);
        }

        let hits = self.store.search(&query).await?;
        let candidates = hits.len();

        let results = if request.boost_critical {
            apply_critical_boost(hits, self.config.critical_boost, limit)
        } else {
            let mut hits = hits;
            hits.truncate(limit);
            hits
        };

        debug!(
            candidates = candidates,
            results = results.len(),
            boosted = request.boost_critical,
            "Retrieved chunks"
        );

        Ok(results)
    }

    #[instrument(skip(self))]
    async fn stats(&self, property_id: &str) -> Result<PropertyStats, DomainError> {
        validate_property_id(property_id)?;
        self.store.stats(property_id).await
    }
}
