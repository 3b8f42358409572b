use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// How a live player is allowed to move around the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementMode {
    /// Normal participation: walking, jumping, colliding.
    Standard,
    /// Detached observer camera.
    FreeCam,
}

/// Full set of movement settings that accompanies a role.
///
/// Role assignments re-apply the whole profile rather than diffing
/// against whatever was applied before.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementProfile {
    pub mode: MovementMode,
    pub flight_allowed: bool,
}

impl MovementProfile {
    /// Profile for an active jumper: grounded, no flight.
    pub fn jumper() -> Self {
        Self {
            mode: MovementMode::Standard,
            flight_allowed: false,
        }
    }

    /// Profile for a spectator: free camera with flight.
    pub fn spectator() -> Self {
        Self {
            mode: MovementMode::FreeCam,
            flight_allowed: true,
        }
    }
}

/// Live handle to a currently-connected player.
pub trait LivePlayer: Send + Sync {
    fn apply_movement(&self, profile: MovementProfile);
}

/// Presence collaborator: resolves a player id to a live handle, or
/// `None` while the player is disconnected. Absence is an expected
/// transient state, not an error.
#[async_trait]
pub trait PlayerPresence: Send + Sync {
    async fn lookup(&self, player_id: Uuid) -> Option<Arc<dyn LivePlayer>>;
}

/// In-memory presence registry for development and testing.
pub struct InMemoryPresence {
    connected: RwLock<HashMap<Uuid, Arc<dyn LivePlayer>>>,
}

impl Default for InMemoryPresence {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPresence {
    /// Creates a registry with nobody connected.
    pub fn new() -> Self {
        Self {
            connected: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a live handle for a player.
    pub async fn connect(&self, player_id: Uuid, handle: Arc<dyn LivePlayer>) {
        self.connected.write().await.insert(player_id, handle);
        debug!(player_id = %player_id, "Player connected");
    }

    /// Drops a player's live handle. Returns whether one was registered.
    pub async fn disconnect(&self, player_id: Uuid) -> bool {
        let removed = self.connected.write().await.remove(&player_id).is_some();
        debug!(player_id = %player_id, removed, "Player disconnected");
        removed
    }
}

#[async_trait]
impl PlayerPresence for InMemoryPresence {
    async fn lookup(&self, player_id: Uuid) -> Option<Arc<dyn LivePlayer>> {
        let connected = self.connected.read().await;
        connected.get(&player_id).cloned()
    }
}

/// Live handle that records every profile applied to it, so tests and
/// diagnostics can inspect role side effects.
pub struct RecordingLivePlayer {
    applied: Mutex<Vec<MovementProfile>>,
}

impl Default for RecordingLivePlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingLivePlayer {
    pub fn new() -> Self {
        Self {
            applied: Mutex::new(Vec::new()),
        }
    }

    /// The most recently applied profile, if any.
    pub fn last_applied(&self) -> Option<MovementProfile> {
        self.applied.lock().unwrap().last().copied()
    }

    /// How many profiles have been applied in total.
    pub fn applied_count(&self) -> usize {
        self.applied.lock().unwrap().len()
    }
}

impl LivePlayer for RecordingLivePlayer {
    fn apply_movement(&self, profile: MovementProfile) {
        self.applied.lock().unwrap().push(profile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jumper_profile_is_grounded() {
        let profile = MovementProfile::jumper();
        assert_eq!(profile.mode, MovementMode::Standard);
        assert!(!profile.flight_allowed);
    }

    #[test]
    fn spectator_profile_is_airborne() {
        let profile = MovementProfile::spectator();
        assert_eq!(profile.mode, MovementMode::FreeCam);
        assert!(profile.flight_allowed);
    }

    #[tokio::test]
    async fn lookup_reflects_connection_state() {
        let presence = InMemoryPresence::new();
        let player_id = Uuid::new_v4();

        assert!(presence.lookup(player_id).await.is_none());

        presence
            .connect(player_id, Arc::new(RecordingLivePlayer::new()))
            .await;
        assert!(presence.lookup(player_id).await.is_some());

        assert!(presence.disconnect(player_id).await);
        assert!(presence.lookup(player_id).await.is_none());
    }

    #[tokio::test]
    async fn disconnect_of_unknown_player_reports_false() {
        let presence = InMemoryPresence::new();
        assert!(!presence.disconnect(Uuid::new_v4()).await);
    }
}
