//! v1 API endpoints

pub mod chunks;
pub mod ingestions;
pub mod properties;
pub mod query;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/ingest", post(ingestions::start_ingestion))
        .route("/ingest/{ingestion_id}", get(ingestions::get_ingestion))
        .route("/ingest/{ingestion_id}/chunks", post(ingestions::chunk_documents))
        .route("/ingest/{ingestion_id}/errors", post(ingestions::record_errors))
        .route("/ingest/{ingestion_id}/progress", post(ingestions::record_progress))
        .route("/chunk", post(chunks::chunk_document))
        .route("/query", post(query::query))
        .route("/properties/{property_id}/stats", get(properties::get_stats))
}
