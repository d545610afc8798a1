//! Domain layer - Core business logic and entities

pub mod document;
pub mod error;
pub mod ingestion;
pub mod outcome;
pub mod retrieval;

pub use document::{DocType, ParsedDocument, ParsedSection};
pub use error::DomainError;
pub use ingestion::{
    ChunkBatch, ChunkDocumentsRequest, ChunkMetadata, ChunkingConfig, ChunkingStrategy,
    DocumentChunk, DocumentSource, IngestionId, IngestionJob, IngestionJobRepository,
    IngestionProgress, IngestionStage, JobStatus, StageErrorReport, StageProgressReport,
    StartIngestionRequest,
};
pub use outcome::{Outcome, OutcomeKind};
pub use retrieval::{
    ChunkStore, PropertyStats, ReplaceResult, RetrievedChunk, SearchQuery,
};
