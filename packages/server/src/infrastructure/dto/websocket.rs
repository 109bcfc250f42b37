//! WebSocket message DTOs for the presence protocol.
//!
//! Every frame on the wire is a JSON object `{"type": ..., "payload": ...}`
//! with a kebab-case type name and camelCase payload fields. The enums below
//! model the whole catalog as adjacently tagged sums, so parsing is
//! exhaustive: a frame either matches one of these shapes or is rejected by
//! serde in one place.

use serde::{Deserialize, Serialize};

use crate::domain::Position;

/// Frames a client may send to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ClientMessage {
    /// Join a space with a platform-issued token
    Join { space_id: String, token: String },
    /// Request a move to absolute tile coordinates
    Move { x: i32, y: i32 },
}

/// Frames the server may send to a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ServerMessage {
    /// Join accepted: spawn position plus the other current occupants
    SpaceJoined {
        spawn: Position,
        users: Vec<UserSummary>,
    },
    /// Another user appeared in the space
    UserJoined { x: i32, y: i32, user_id: String },
    /// Another user moved to new coordinates
    Move { x: i32, y: i32, user_id: String },
    /// Own move accepted; carries the authoritative coordinates
    MovementAccepted { x: i32, y: i32, user_id: String },
    /// Own move rejected; carries the authoritative (unchanged) coordinates
    MovementRejected { x: i32, y: i32, user_id: String },
    /// A user left the space
    UserLeft { user_id: String },
}

/// Occupant entry in the `space-joined` manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(rename = "userId")]
    pub user_id: String,
}
