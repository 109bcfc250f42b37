//! Domain factories for creating domain entities and value objects.

use super::value_object::SessionId;

/// Factory for generating SessionId instances.
///
/// This factory encapsulates the logic for generating new session
/// identifiers, separating the generation concern from the SessionId type
/// itself. Ids are random UUID v4 values, so they never collide in practice
/// and never leak information about other connections.
pub struct SessionIdFactory;

impl SessionIdFactory {
    /// Generate a new SessionId with a random UUID v4.
    pub fn generate() -> SessionId {
        SessionId::from_uuid(uuid::Uuid::new_v4())
    }
}
