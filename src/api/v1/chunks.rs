//! Stateless chunking endpoint

use axum::extract::State;

use crate::api::state::AppState;
use crate::api::types::{ApiError, ChunkRequest, ChunkResponse, Json};
use crate::domain::ingestion::{validate_property_id, ChunkingStrategy};
use crate::infrastructure::ingestion::SectionChunker;

/// POST /v1/chunk - Chunk one parsed document without storing it
pub async fn chunk_document(
    State(state): State<AppState>,
    Json(request): Json<ChunkRequest>,
) -> Result<Json<ChunkResponse>, ApiError> {
    validate_property_id(&request.property_id)?;

    let chunker = SectionChunker::from_requested(
        request.chunk_size.unwrap_or(state.chunking.chunk_size()),
        request.chunk_overlap.unwrap_or(state.chunking.chunk_overlap()),
    );

    let chunks =
        chunker.chunk_document(&request.document, &request.property_id, &request.ingestion_id);

    Ok(Json(ChunkResponse {
        config: chunker.config(),
        total_chunks: chunks.len(),
        chunks,
    }))
}
