//! Property endpoints

use axum::extract::{Path, State};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::retrieval::PropertyStats;

/// GET /v1/properties/{property_id}/stats - Stored chunk summary
pub async fn get_stats(
    State(state): State<AppState>,
    Path(property_id): Path<String>,
) -> Result<Json<PropertyStats>, ApiError> {
    let stats = state.retrieval_service.stats(&property_id).await?;
    Ok(Json(stats))
}
