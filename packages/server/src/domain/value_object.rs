//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{MoveError, ValueObjectError};

/// Session identifier value object.
///
/// Identifies one WebSocket connection for its whole lifetime. Session ids
/// are minted by [`super::factory::SessionIdFactory`], never parsed from
/// client input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Create a SessionId from a generated UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid.to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User identifier value object.
///
/// Represents the authenticated platform identity behind a session, as
/// extracted from a verified join token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId.
    ///
    /// # Arguments
    ///
    /// * `id` - The user identifier string
    ///
    /// # Returns
    ///
    /// A Result containing the UserId or an error if validation fails
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::UserIdEmpty);
        }
        let len = id.len();
        if len > 100 {
            return Err(ValueObjectError::UserIdTooLong {
                max: 100,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Space identifier value object.
///
/// Represents a unique identifier for a space (a room instance).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpaceId(String);

impl SpaceId {
    /// Create a new SpaceId.
    ///
    /// # Arguments
    ///
    /// * `id` - The space identifier string
    ///
    /// # Returns
    ///
    /// A Result containing the SpaceId or an error if validation fails
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::SpaceIdEmpty);
        }
        let len = id.len();
        if len > 100 {
            return Err(ValueObjectError::SpaceIdTooLong {
                max: 100,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tile position value object.
///
/// Authoritative coordinates of a session on the space's tile grid.
/// The origin `(0, 0)` is the spawn point for every joining session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Create a new Position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Attempt a single-step move to `target`.
    ///
    /// A legal step changes exactly one axis by exactly one tile; diagonal,
    /// zero-length, and multi-tile moves are rejected.
    ///
    /// # Returns
    ///
    /// * `Ok(Position)` - The new position (always equal to `target`)
    /// * `Err(MoveError)` - The move is not a single cardinal step
    pub fn step_to(self, target: Position) -> Result<Position, MoveError> {
        let dx = self.x.abs_diff(target.x);
        let dy = self.y.abs_diff(target.y);
        if (dx == 1 && dy == 0) || (dx == 0 && dy == 1) {
            Ok(target)
        } else {
            Err(MoveError::NotCardinalStep {
                from: self,
                to: target,
            })
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds (JST).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a new Timestamp.
    ///
    /// # Arguments
    ///
    /// * `value` - Unix timestamp in milliseconds
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
