//! Client error definitions.

use thiserror::Error;

/// Errors that can stop the client
#[derive(Debug, Error)]
pub enum ClientError {
    /// WebSocket connect or transport failure
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// The server closed the connection before accepting the join
    #[error("join rejected by server (check the token and the space id)")]
    JoinRejected,
}
