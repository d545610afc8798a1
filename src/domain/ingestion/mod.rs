//! Document ingestion domain types and traits
//!
//! This module provides:
//! - `ChunkingStrategy` trait for splitting parsed documents into chunks
//! - `IngestionJob` and its repository, the typed record of a run
//! - Request and result types for the pipeline stages

pub mod chunk;
pub mod chunker;
pub mod job;
pub mod pipeline;
pub mod repository;
pub mod validation;

// Re-export main types
pub use chunk::{chunk_id, ChunkMetadata, DocumentChunk};
pub use chunker::{
    ChunkingConfig, ChunkingStrategy, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE,
    MIN_CHUNK_SIZE,
};
pub use job::{IngestionId, IngestionJob, IngestionProgress, IngestionStage, JobStatus};
pub use pipeline::{
    ChunkBatch, ChunkDocumentsRequest, DocumentSource, StageErrorReport, StageProgressReport,
    StartIngestionRequest,
};
pub use repository::IngestionJobRepository;
pub use validation::{validate_property_id, validate_start_request};

// Re-export mocks for testing
#[cfg(test)]
pub use chunker::mock::MockChunkingStrategy;
#[cfg(test)]
pub use repository::MockIngestionJobRepository;
