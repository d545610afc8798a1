//! Ingestion and chunking API types

use serde::{Deserialize, Serialize};

use crate::domain::document::ParsedDocument;
use crate::domain::ingestion::{
    ChunkBatch, ChunkingConfig, DocumentChunk, IngestionJob, IngestionStage, JobStatus,
};
use crate::domain::outcome::{Outcome, OutcomeKind};

/// Response when an ingestion job is accepted (HTTP 202)
#[derive(Debug, Clone, Serialize)]
pub struct IngestionCreatedResponse {
    pub ingestion_id: String,
    pub property_id: String,
    pub status: JobStatus,
    pub documents_queued: usize,
    pub created_at: String,
}

impl From<&IngestionJob> for IngestionCreatedResponse {
    fn from(job: &IngestionJob) -> Self {
        Self {
            ingestion_id: job.id().to_string(),
            property_id: job.property_id().to_string(),
            status: job.status(),
            documents_queued: job.progress().total_documents,
            created_at: job.created_at().to_rfc3339(),
        }
    }
}

/// Per-stage counters of a job
#[derive(Debug, Clone, Serialize)]
pub struct ProgressResponse {
    pub documents_discovered: usize,
    pub documents_parsed: usize,
    pub documents_chunked: usize,
    pub documents_embedded: usize,
    pub total_documents: usize,
}

/// Status of an ingestion job
#[derive(Debug, Clone, Serialize)]
pub struct IngestionStatusResponse {
    pub ingestion_id: String,
    pub property_id: String,
    pub status: JobStatus,
    pub progress: ProgressResponse,
    pub chunks_created: usize,
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_stage: Option<IngestionStage>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&IngestionJob> for IngestionStatusResponse {
    fn from(job: &IngestionJob) -> Self {
        let progress = job.progress();

        Self {
            ingestion_id: job.id().to_string(),
            property_id: job.property_id().to_string(),
            status: job.status(),
            progress: ProgressResponse {
                documents_discovered: progress.documents_discovered,
                documents_parsed: progress.documents_parsed,
                documents_chunked: progress.documents_chunked,
                documents_embedded: progress.documents_embedded,
                total_documents: progress.total_documents,
            },
            chunks_created: job.chunks_created(),
            errors: job.errors().to_vec(),
            failed_stage: job.failed_stage(),
            created_at: job.created_at().to_rfc3339(),
            updated_at: job.updated_at().to_rfc3339(),
        }
    }
}

impl From<IngestionJob> for IngestionStatusResponse {
    fn from(job: IngestionJob) -> Self {
        IngestionStatusResponse::from(&job)
    }
}

/// Result of the chunking stage for a job
#[derive(Debug, Clone, Serialize)]
pub struct ChunkStageResponse {
    pub outcome: OutcomeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub documents_chunked: usize,
    pub chunks_created: usize,
    pub errors: Vec<String>,
    pub chunks: Vec<DocumentChunk>,
}

impl From<Outcome<ChunkBatch>> for ChunkStageResponse {
    fn from(outcome: Outcome<ChunkBatch>) -> Self {
        let kind = outcome.kind();
        let reason = outcome.reason().map(String::from);
        let batch = outcome.into_value().unwrap_or_default();

        Self {
            outcome: kind,
            reason,
            documents_chunked: batch.documents_chunked,
            chunks_created: batch.chunks.len(),
            errors: batch.errors,
            chunks: batch.chunks,
        }
    }
}

/// Stateless chunking of one parsed document
#[derive(Debug, Clone, Deserialize)]
pub struct ChunkRequest {
    pub document: ParsedDocument,
    pub property_id: String,
    pub ingestion_id: String,
    #[serde(default)]
    pub chunk_size: Option<usize>,
    #[serde(default)]
    pub chunk_overlap: Option<usize>,
}

/// Chunks of one document and the configuration that produced them
#[derive(Debug, Clone, Serialize)]
pub struct ChunkResponse {
    pub config: ChunkingConfig,
    pub total_chunks: usize,
    pub chunks: Vec<DocumentChunk>,
}
