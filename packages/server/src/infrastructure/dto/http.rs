//! HTTP API response DTOs for the presence server.

use serde::{Deserialize, Serialize};

/// Space summary for list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceSummaryDto {
    pub id: String,
    pub occupant_count: usize,
}

/// Space detail for detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceDetailDto {
    pub id: String,
    pub occupants: Vec<OccupantDetailDto>,
}

/// Occupant detail for space detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupantDetailDto {
    pub user_id: String,
    pub connected_at: String, // ISO 8601
}
