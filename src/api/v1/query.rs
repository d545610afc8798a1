//! Retrieval endpoint

use axum::extract::State;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, QueryResponse, QueryResult};
use crate::infrastructure::services::RetrievalRequest;

/// POST /v1/query - Chunks most relevant to a guest question
pub async fn query(
    State(state): State<AppState>,
    Json(request): Json<RetrievalRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    let property_id = request.property_id.clone();
    let query = request.query.clone();

    let results = state.retrieval_service.retrieve(request).await?;

    Ok(Json(QueryResponse {
        property_id,
        query,
        results: results.into_iter().map(QueryResult::from).collect(),
    }))
}
