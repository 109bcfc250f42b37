//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use hiroba_shared::time::timestamp_to_jst_rfc3339;

use crate::{
    domain::SpaceId,
    infrastructure::dto::http::{OccupantDetailDto, SpaceDetailDto, SpaceSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get the spaces with live presence, with their occupant counts
pub async fn get_spaces(State(state): State<Arc<AppState>>) -> Json<Vec<SpaceSummaryDto>> {
    let snapshot = state.registry.snapshot().await;

    let summaries = snapshot
        .iter()
        .map(|(space_id, occupants)| SpaceSummaryDto {
            id: space_id.as_str().to_string(),
            occupant_count: occupants.len(),
        })
        .collect();

    Json(summaries)
}

/// Get occupant detail for one space
pub async fn get_space_detail(
    State(state): State<Arc<AppState>>,
    Path(space_id): Path<String>,
) -> Result<Json<SpaceDetailDto>, StatusCode> {
    // An id that fails validation can never hold presence
    let space_id = SpaceId::new(space_id).map_err(|_| StatusCode::NOT_FOUND)?;

    let Some(occupants) = state.registry.occupants(&space_id).await else {
        return Err(StatusCode::NOT_FOUND);
    };

    let detail = SpaceDetailDto {
        id: space_id.as_str().to_string(),
        occupants: occupants
            .iter()
            .map(|occupant| OccupantDetailDto {
                user_id: occupant.user_id.as_str().to_string(),
                connected_at: timestamp_to_jst_rfc3339(occupant.connected_at.value()),
            })
            .collect(),
    };

    Ok(Json(detail))
}
