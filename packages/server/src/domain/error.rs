//! Domain layer error definitions.

use thiserror::Error;

use super::value_object::Position;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// UserId validation error
    #[error("UserId cannot be empty")]
    UserIdEmpty,

    /// UserId too long error
    #[error("UserId cannot exceed {max} characters (got {actual})")]
    UserIdTooLong { max: usize, actual: usize },

    /// SpaceId validation error
    #[error("SpaceId cannot be empty")]
    SpaceIdEmpty,

    /// SpaceId too long error
    #[error("SpaceId cannot exceed {max} characters (got {actual})")]
    SpaceIdTooLong { max: usize, actual: usize },
}

/// Errors related to movement validation
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// Movement must change exactly one axis by exactly one tile
    #[error("illegal move from {from} to {to}: not a single cardinal step")]
    NotCardinalStep { from: Position, to: Position },
}

/// Errors returned by the token verification port
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Token was rejected (bad signature, malformed, expired, ...)
    #[error("token verification failed: {0}")]
    InvalidToken(String),

    /// Token verified but carried no usable user identity
    #[error("token carries no valid user id")]
    MissingUserId,
}

/// Errors returned by the space directory port
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpaceLookupError {
    /// The directory backend could not answer the existence check
    #[error("space directory unavailable: {0}")]
    Unavailable(String),
}
