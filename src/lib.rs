//! Property knowledge ingestion
//!
//! Turns parsed property documents (house manuals, local guides, policies)
//! into retrieval-ready chunks:
//! - Section-aware chunking with in-section overlap
//! - Critical-section classification and retrieval boosting
//! - Ingestion jobs with per-stage error reporting

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::ingestion::ChunkingStrategy;
use infrastructure::{
    ingestion::{InMemoryIngestionJobRepository, SectionChunker},
    retrieval::InMemoryChunkStore,
    services::{IngestionService, RetrievalConfig, RetrievalService},
};
use tracing::info;

/// Create the application state with default configuration
pub fn create_app_state() -> AppState {
    create_app_state_with_config(&AppConfig::default())
}

/// Create the application state with custom configuration
pub fn create_app_state_with_config(config: &AppConfig) -> AppState {
    let chunker = SectionChunker::from_requested(
        config.chunking.chunk_size,
        config.chunking.chunk_overlap,
    );
    let chunking = chunker.config();

    let jobs = Arc::new(InMemoryIngestionJobRepository::new());
    let store = Arc::new(InMemoryChunkStore::new());

    let ingestion_service = Arc::new(IngestionService::new(
        Arc::new(chunker),
        jobs.clone(),
        store.clone(),
    ));

    let retrieval_service = Arc::new(RetrievalService::with_config(
        store,
        RetrievalConfig {
            critical_boost: config.retrieval.critical_boost,
            default_limit: config.retrieval.default_limit,
        },
    ));

    info!(
        chunk_size = chunking.chunk_size(),
        chunk_overlap = chunking.chunk_overlap(),
        critical_boost = config.retrieval.critical_boost,
        "Application state created"
    );

    AppState::new(ingestion_service, retrieval_service, jobs, chunking)
}
