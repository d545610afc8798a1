//! Application state for shared services

use std::sync::Arc;

use crate::domain::ingestion::{ChunkingConfig, IngestionJobRepository};
use crate::infrastructure::services::{IngestionServiceTrait, RetrievalServiceTrait};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub ingestion_service: Arc<dyn IngestionServiceTrait>,
    pub retrieval_service: Arc<dyn RetrievalServiceTrait>,
    pub job_repository: Arc<dyn IngestionJobRepository>,
    /// Defaults for stateless chunking requests
    pub chunking: ChunkingConfig,
}

impl AppState {
    pub fn new(
        ingestion_service: Arc<dyn IngestionServiceTrait>,
        retrieval_service: Arc<dyn RetrievalServiceTrait>,
        job_repository: Arc<dyn IngestionJobRepository>,
        chunking: ChunkingConfig,
    ) -> Self {
        Self {
            ingestion_service,
            retrieval_service,
            job_repository,
            chunking,
        }
    }
}
