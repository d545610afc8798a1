//! Ingestion job endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, ChunkStageResponse, IngestionCreatedResponse, IngestionStatusResponse, Json,
};
use crate::domain::ingestion::{
    ChunkDocumentsRequest, StageErrorReport, StageProgressReport, StartIngestionRequest,
};

/// POST /v1/ingest - Start an ingestion job
pub async fn start_ingestion(
    State(state): State<AppState>,
    Json(request): Json<StartIngestionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let job = state.ingestion_service.start(request).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(IngestionCreatedResponse::from(&job)),
    ))
}

/// GET /v1/ingest/{ingestion_id} - Job status
pub async fn get_ingestion(
    State(state): State<AppState>,
    Path(ingestion_id): Path<String>,
) -> Result<Json<IngestionStatusResponse>, ApiError> {
    let job = state.ingestion_service.status(&ingestion_id).await?;
    Ok(Json(IngestionStatusResponse::from(job)))
}

/// POST /v1/ingest/{ingestion_id}/chunks - Chunk parsed documents for a job
///
/// Responds 422 when no document could be chunked.
pub async fn chunk_documents(
    State(state): State<AppState>,
    Path(ingestion_id): Path<String>,
    Json(request): Json<ChunkDocumentsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state
        .ingestion_service
        .chunk_documents(&ingestion_id, request)
        .await?;

    let status = if outcome.is_failed() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    };

    Ok((status, Json(ChunkStageResponse::from(outcome))))
}

/// POST /v1/ingest/{ingestion_id}/errors - Record a stage failure
pub async fn record_errors(
    State(state): State<AppState>,
    Path(ingestion_id): Path<String>,
    Json(report): Json<StageErrorReport>,
) -> Result<Json<IngestionStatusResponse>, ApiError> {
    let job = state
        .ingestion_service
        .record_stage_failure(&ingestion_id, report.stage, report.errors)
        .await?;

    Ok(Json(IngestionStatusResponse::from(job)))
}

/// POST /v1/ingest/{ingestion_id}/progress - Record a stage's document count
pub async fn record_progress(
    State(state): State<AppState>,
    Path(ingestion_id): Path<String>,
    Json(report): Json<StageProgressReport>,
) -> Result<Json<IngestionStatusResponse>, ApiError> {
    let job = state
        .ingestion_service
        .record_progress(&ingestion_id, report.stage, report.documents)
        .await?;

    Ok(Json(IngestionStatusResponse::from(job)))
}
