//! Domain layer for the presence server.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod port;
pub mod value_object;

pub use entity::Occupant;
pub use error::{AuthError, MoveError, SpaceLookupError, ValueObjectError};
pub use factory::SessionIdFactory;
pub use port::{SpaceDirectory, TokenVerifier};
pub use value_object::{Position, SessionId, SpaceId, Timestamp, UserId};

#[cfg(test)]
pub use port::{MockSpaceDirectory, MockTokenVerifier};
