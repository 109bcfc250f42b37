//! Server state and dependency wiring.

use std::sync::Arc;

use crate::domain::{SpaceDirectory, TokenVerifier};
use crate::registry::SpaceRegistry;

/// Shared application state
pub struct AppState {
    /// Process-wide presence registry
    pub registry: Arc<SpaceRegistry>,
    /// Token verification port（依存性の逆転）
    pub verifier: Arc<dyn TokenVerifier>,
    /// Space existence port（依存性の逆転）
    pub directory: Arc<dyn SpaceDirectory>,
}
