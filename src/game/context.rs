use std::sync::{Arc, RwLock};
use uuid::Uuid;

use super::GamePhase;
use crate::map::SpawnAllocator;
use crate::presence::PlayerPresence;

/// Handle to the owning game instance, shared by all of its player
/// sessions.
///
/// The game loop drives the phase; sessions read it when deciding
/// whether their stats count. The map and presence collaborators are
/// shared across every session of the game.
pub struct GameContext {
    game_id: Uuid,
    phase: RwLock<GamePhase>,
    map: Arc<dyn SpawnAllocator>,
    presence: Arc<dyn PlayerPresence>,
}

impl GameContext {
    /// Creates a context for a fresh game instance in `Init`.
    pub fn new(map: Arc<dyn SpawnAllocator>, presence: Arc<dyn PlayerPresence>) -> Self {
        Self {
            game_id: Uuid::new_v4(),
            phase: RwLock::new(GamePhase::Init),
            map,
            presence,
        }
    }

    /// Unique id of this game instance.
    pub fn game_id(&self) -> Uuid {
        self.game_id
    }

    pub fn phase(&self) -> GamePhase {
        *self.phase.read().unwrap()
    }

    /// Called by the game loop on every phase transition.
    pub fn set_phase(&self, phase: GamePhase) {
        *self.phase.write().unwrap() = phase;
    }

    pub fn map(&self) -> &Arc<dyn SpawnAllocator> {
        &self.map
    }

    pub fn presence(&self) -> &Arc<dyn PlayerPresence> {
        &self.presence
    }
}
