//! Domain ports for external collaborators.
//!
//! The presence core talks to the rest of the platform only through these
//! traits; concrete adapters live in the infrastructure layer（依存性の逆転）.

use async_trait::async_trait;

use super::error::{AuthError, SpaceLookupError};
use super::value_object::{SpaceId, UserId};

/// Verifies join tokens and extracts the authenticated user identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify `token` and return the user id it was issued to.
    async fn verify(&self, token: &str) -> Result<UserId, AuthError>;
}

/// Answers whether a space exists on the platform.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpaceDirectory: Send + Sync {
    /// Check whether `space_id` refers to an existing space.
    async fn exists(&self, space_id: &SpaceId) -> Result<bool, SpaceLookupError>;
}
