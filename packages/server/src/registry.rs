//! Process-wide directory of space membership and broadcast fan-out.
//!
//! Many connection tasks mutate the same membership map concurrently, so
//! every operation runs inside one critical section: "snapshot members, then
//! send to each" can never observe a torn view. Delivery uses the per-session
//! unbounded channels registered on join; sends never block, so holding the
//! lock across a fan-out is safe.
//!
//! The registry carries no protocol knowledge: payloads arrive here already
//! serialized, and a failed delivery is logged and skipped, never propagated
//! to the session that triggered the fan-out.

use std::collections::HashMap;

use tokio::sync::{Mutex, mpsc};

use crate::domain::{Occupant, SessionId, SpaceId, Timestamp, UserId};

/// Connection handle for one session occupying a space
struct OccupantHandle {
    /// Authenticated user identity behind the session
    user_id: UserId,
    /// Outbound frame channel to the session's connection task
    sender: mpsc::UnboundedSender<String>,
    /// Timestamp when the session joined
    connected_at: Timestamp,
}

/// Shared directory mapping spaces to their active sessions
pub struct SpaceRegistry {
    /// space → (session → handle); spaces exist only while occupied
    spaces: Mutex<HashMap<SpaceId, HashMap<SessionId, OccupantHandle>>>,
}

impl SpaceRegistry {
    /// Create a new empty SpaceRegistry.
    pub fn new() -> Self {
        Self {
            spaces: Mutex::new(HashMap::new()),
        }
    }

    /// Insert a session into a space and announce it to the existing members.
    ///
    /// The returned list is the set of *other* occupants at the instant of
    /// insertion; `announce` is delivered to exactly that set within the same
    /// critical section, so a concurrent joiner is either in the returned
    /// manifest or receives the announcement, never both and never neither.
    ///
    /// Re-adding an existing session replaces its handle and announces
    /// nothing to itself.
    pub async fn add_session(
        &self,
        space_id: &SpaceId,
        session_id: &SessionId,
        user_id: &UserId,
        sender: mpsc::UnboundedSender<String>,
        connected_at: Timestamp,
        announce: &str,
    ) -> Vec<Occupant> {
        let mut spaces = self.spaces.lock().await;
        let members = spaces.entry(space_id.clone()).or_default();

        let mut others = Vec::with_capacity(members.len());
        for (id, handle) in members.iter() {
            if id == session_id {
                continue;
            }
            if handle.sender.send(announce.to_string()).is_err() {
                tracing::warn!("Failed to send to session '{}' in space '{}'", id, space_id);
            }
            others.push(Occupant::new(
                id.clone(),
                handle.user_id.clone(),
                handle.connected_at,
            ));
        }

        members.insert(
            session_id.clone(),
            OccupantHandle {
                user_id: user_id.clone(),
                sender,
                connected_at,
            },
        );

        others
    }

    /// Remove a session from a space and deliver `farewell` to the remaining
    /// members.
    ///
    /// Removing a session that is not a member is a no-op (and delivers
    /// nothing), which makes the caller's close path idempotent. The space
    /// entry itself is dropped once its last member leaves.
    ///
    /// # Returns
    ///
    /// `true` if the session was a member and has been removed
    pub async fn remove_session(
        &self,
        space_id: &SpaceId,
        session_id: &SessionId,
        farewell: &str,
    ) -> bool {
        let mut spaces = self.spaces.lock().await;
        let Some(members) = spaces.get_mut(space_id) else {
            return false;
        };
        if members.remove(session_id).is_none() {
            return false;
        }

        for (id, handle) in members.iter() {
            if handle.sender.send(farewell.to_string()).is_err() {
                tracing::warn!("Failed to send to session '{}' in space '{}'", id, space_id);
            }
        }

        if members.is_empty() {
            spaces.remove(space_id);
        }

        true
    }

    /// Deliver `payload` to every member of a space except `exclude`.
    ///
    /// # Returns
    ///
    /// The number of sessions the payload was actually delivered to
    pub async fn broadcast(&self, space_id: &SpaceId, payload: &str, exclude: &SessionId) -> usize {
        let spaces = self.spaces.lock().await;
        let Some(members) = spaces.get(space_id) else {
            return 0;
        };

        let mut delivered = 0;
        for (id, handle) in members.iter() {
            if id == exclude {
                continue;
            }
            if handle.sender.send(payload.to_string()).is_err() {
                tracing::warn!("Failed to send to session '{}' in space '{}'", id, space_id);
            } else {
                delivered += 1;
            }
        }

        delivered
    }

    /// Get the occupants of a space, or None if it has no live presence.
    pub async fn occupants(&self, space_id: &SpaceId) -> Option<Vec<Occupant>> {
        let spaces = self.spaces.lock().await;
        spaces.get(space_id).map(Self::collect_sorted)
    }

    /// Count the sessions currently occupying a space.
    pub async fn occupant_count(&self, space_id: &SpaceId) -> usize {
        let spaces = self.spaces.lock().await;
        spaces.get(space_id).map_or(0, HashMap::len)
    }

    /// Count the spaces with at least one occupant.
    pub async fn space_count(&self) -> usize {
        self.spaces.lock().await.len()
    }

    /// Get every occupied space with its occupants.
    pub async fn snapshot(&self) -> Vec<(SpaceId, Vec<Occupant>)> {
        let spaces = self.spaces.lock().await;
        let mut snapshot: Vec<(SpaceId, Vec<Occupant>)> = spaces
            .iter()
            .map(|(space_id, members)| (space_id.clone(), Self::collect_sorted(members)))
            .collect();
        snapshot.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));
        snapshot
    }

    fn collect_sorted(members: &HashMap<SessionId, OccupantHandle>) -> Vec<Occupant> {
        let mut occupants: Vec<Occupant> = members
            .iter()
            .map(|(id, handle)| {
                Occupant::new(id.clone(), handle.user_id.clone(), handle.connected_at)
            })
            .collect();
        // Sort by user_id for consistent ordering
        occupants.sort_by(|a, b| a.user_id.as_str().cmp(b.user_id.as_str()));
        occupants
    }
}

impl Default for SpaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
