//! Top-level server error definitions.

use thiserror::Error;

use crate::domain::ValueObjectError;

/// Errors that can stop the server before or during serving
#[derive(Debug, Error)]
pub enum ServerError {
    /// A configured space id failed domain validation
    #[error("invalid space id in configuration: {0}")]
    InvalidSpaceId(#[from] ValueObjectError),

    /// Binding the listener or serving connections failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
