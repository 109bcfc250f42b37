//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::SessionIdFactory,
    session::{FrameOutcome, Session},
    ui::state::AppState,
};

/// Accept a WebSocket upgrade and hand the connection to its session task.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Create a channel for frames addressed to this session
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let session_id = SessionIdFactory::generate();
    tracing::info!("Session '{}' connected", session_id);

    let mut session = Session::new(
        session_id,
        tx,
        state.registry.clone(),
        state.verifier.clone(),
        state.directory.clone(),
    );

    // Spawn a task that pumps registry deliveries and replies onto the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // Drive the state machine from inbound frames in this task, so the
    // session is still owned here when the connection winds down.
    loop {
        tokio::select! {
            inbound = receiver.next() => {
                let msg = match inbound {
                    Some(Ok(msg)) => msg,
                    Some(Err(e)) => {
                        tracing::error!("WebSocket error: {}", e);
                        break;
                    }
                    None => break,
                };

                match msg {
                    Message::Text(text) => {
                        if session.handle_frame(&text).await == FrameOutcome::Close {
                            break;
                        }
                    }
                    Message::Ping(_) => {
                        tracing::debug!("Received ping");
                        // Ping/pong is handled automatically by the WebSocket protocol
                    }
                    Message::Close(_) => {
                        tracing::info!("Session '{}' requested close", session.id());
                        break;
                    }
                    _ => {}
                }
            }
            _ = &mut send_task => {
                // Socket send half is gone; stop reading
                break;
            }
        }
    }

    session.close().await;
    send_task.abort();
    tracing::info!("Session '{}' disconnected", session.id());
}
