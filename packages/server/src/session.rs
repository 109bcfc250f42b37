//! Per-connection protocol state machine.
//!
//! One `Session` exists per WebSocket connection and is driven by that
//! connection's task, one inbound frame at a time. It owns the protocol
//! state (`Connected` → `Joined` → `Closed`), validates every transition,
//! and decides for each frame whether the connection stays open.
//!
//! Failure policy: a failed join and any frame that violates the protocol
//! state close the connection without a response frame, so a probing client
//! cannot distinguish a bad token from an unknown space. Frames that do not
//! parse are logged and dropped without touching the connection.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::{Position, SessionId, SpaceDirectory, SpaceId, TokenVerifier, UserId};
use crate::infrastructure::dto::websocket::{ClientMessage, ServerMessage};
use crate::registry::SpaceRegistry;
use crate::usecase::JoinSpaceUseCase;

/// What the connection task should do after a frame has been handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Keep the connection open and read the next frame
    Continue,
    /// Terminate the connection
    Close,
}

/// Protocol state of a session
enum SessionState {
    /// Socket accepted, no space joined yet
    Connected,
    /// Authenticated and present in a space
    Joined {
        user_id: UserId,
        space_id: SpaceId,
        position: Position,
    },
    /// Session ended; no further transitions
    Closed,
}

/// Protocol state machine for one WebSocket connection
pub struct Session {
    /// Process-unique id assigned at connection accept
    id: SessionId,
    state: SessionState,
    /// Outbound channel back to this session's own socket
    outbound: mpsc::UnboundedSender<String>,
    registry: Arc<SpaceRegistry>,
    verifier: Arc<dyn TokenVerifier>,
    directory: Arc<dyn SpaceDirectory>,
}

impl Session {
    /// Create a new Session in the `Connected` state.
    pub fn new(
        id: SessionId,
        outbound: mpsc::UnboundedSender<String>,
        registry: Arc<SpaceRegistry>,
        verifier: Arc<dyn TokenVerifier>,
        directory: Arc<dyn SpaceDirectory>,
    ) -> Self {
        Self {
            id,
            state: SessionState::Connected,
            outbound,
            registry,
            verifier,
            directory,
        }
    }

    /// Get this session's id.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Handle one inbound text frame.
    ///
    /// # Returns
    ///
    /// * `FrameOutcome::Continue` - keep reading frames
    /// * `FrameOutcome::Close` - the connection must be terminated
    pub async fn handle_frame(&mut self, raw: &str) -> FrameOutcome {
        let message = match serde_json::from_str::<ClientMessage>(raw) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!("Session '{}': ignoring malformed frame: {}", self.id, e);
                return FrameOutcome::Continue;
            }
        };

        match message {
            ClientMessage::Join { space_id, token } => self.handle_join(space_id, token).await,
            ClientMessage::Move { x, y } => self.handle_move(Position::new(x, y)).await,
        }
    }

    /// Handle a `join` frame: authenticate, register, reply `space-joined`.
    async fn handle_join(&mut self, space_id: String, token: String) -> FrameOutcome {
        if !matches!(self.state, SessionState::Connected) {
            tracing::warn!("Session '{}': join in joined or closed state, closing", self.id);
            return FrameOutcome::Close;
        }

        // Convert String -> SpaceId (Domain Model)
        let space_id = match SpaceId::new(space_id) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("Session '{}': join with invalid space id: {}", self.id, e);
                return FrameOutcome::Close;
            }
        };

        let join_usecase = JoinSpaceUseCase::new(
            self.verifier.clone(),
            self.directory.clone(),
            self.registry.clone(),
        );

        let outcome = match join_usecase
            .execute(&self.id, &space_id, &token, self.outbound.clone())
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                // No response frame on a rejected join; closing is the only signal.
                tracing::warn!("Session '{}': join rejected: {}", self.id, e);
                return FrameOutcome::Close;
            }
        };

        tracing::info!(
            "Session '{}': user '{}' joined space '{}'",
            self.id,
            outcome.user_id,
            space_id
        );

        self.send(&ServerMessage::SpaceJoined {
            spawn: outcome.spawn,
            users: outcome.users.clone(),
        });

        self.state = SessionState::Joined {
            user_id: outcome.user_id,
            space_id,
            position: outcome.spawn,
        };

        FrameOutcome::Continue
    }

    /// Handle a `move` frame: validate the step, echo the verdict, broadcast.
    async fn handle_move(&mut self, target: Position) -> FrameOutcome {
        let (user_id, space_id, current) = match &self.state {
            SessionState::Joined {
                user_id,
                space_id,
                position,
            } => (user_id.clone(), space_id.clone(), *position),
            _ => {
                tracing::warn!("Session '{}': move outside a space, closing", self.id);
                return FrameOutcome::Close;
            }
        };

        match current.step_to(target) {
            Ok(next) => {
                self.set_position(next);
                self.send(&ServerMessage::MovementAccepted {
                    x: next.x,
                    y: next.y,
                    user_id: user_id.as_str().to_string(),
                });

                let broadcast = serde_json::to_string(&ServerMessage::Move {
                    x: next.x,
                    y: next.y,
                    user_id: user_id.as_str().to_string(),
                })
                .unwrap();
                self.registry.broadcast(&space_id, &broadcast, &self.id).await;
            }
            Err(e) => {
                tracing::debug!("Session '{}': {}", self.id, e);
                // Echo the authoritative position so the client can resync.
                self.send(&ServerMessage::MovementRejected {
                    x: current.x,
                    y: current.y,
                    user_id: user_id.as_str().to_string(),
                });
            }
        }

        FrameOutcome::Continue
    }

    /// Close the session, leaving its space if one was joined.
    ///
    /// Idempotent: only the transition out of `Joined` removes the session
    /// from the registry and notifies the remaining occupants, so repeated
    /// calls produce no second `user-left`.
    pub async fn close(&mut self) {
        let state = std::mem::replace(&mut self.state, SessionState::Closed);
        let SessionState::Joined {
            user_id, space_id, ..
        } = state
        else {
            return;
        };

        let farewell = serde_json::to_string(&ServerMessage::UserLeft {
            user_id: user_id.as_str().to_string(),
        })
        .unwrap();

        if self
            .registry
            .remove_session(&space_id, &self.id, &farewell)
            .await
        {
            tracing::info!(
                "Session '{}': user '{}' left space '{}'",
                self.id,
                user_id,
                space_id
            );
        }
    }

    fn set_position(&mut self, next: Position) {
        if let SessionState::Joined { position, .. } = &mut self.state {
            *position = next;
        }
    }

    fn send(&self, message: &ServerMessage) {
        let json = serde_json::to_string(message).unwrap();
        if self.outbound.send(json).is_err() {
            tracing::warn!("Session '{}': outbound channel closed", self.id);
        }
    }
}
