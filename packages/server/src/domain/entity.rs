//! Core domain models for the presence server.

use serde::{Deserialize, Serialize};

use super::value_object::{SessionId, Timestamp, UserId};

/// Represents a user present in a space through one WebSocket session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupant {
    /// Session identifier (one per connection)
    pub session_id: SessionId,
    /// Authenticated user identity behind the session
    pub user_id: UserId,
    /// Timestamp when the session joined the space
    pub connected_at: Timestamp,
}

impl Occupant {
    /// Create a new occupant
    pub fn new(session_id: SessionId, user_id: UserId, connected_at: Timestamp) -> Self {
        Self {
            session_id,
            user_id,
            connected_at,
        }
    }
}
