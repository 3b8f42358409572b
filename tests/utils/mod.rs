use std::sync::Arc;

use uuid::Uuid;

use highdive::{
    GameContext, InMemoryPresence, InMemoryStatsRepository, PlayerSession, RecordingLivePlayer,
    ResultRecorder, ShuffledSpawnAllocator, SpawnPoint,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

/// One game instance wired to in-memory collaborators.
pub struct GameFixture {
    pub game: Arc<GameContext>,
    pub presence: Arc<InMemoryPresence>,
    pub repository: Arc<InMemoryStatsRepository>,
    pub recorder: ResultRecorder,
}

impl GameFixture {
    pub fn new() -> Self {
        let presence = Arc::new(InMemoryPresence::new());
        let repository = Arc::new(InMemoryStatsRepository::new());
        let game = Arc::new(GameContext::new(
            Arc::new(ShuffledSpawnAllocator::new(platform_points())),
            presence.clone(),
        ));
        let recorder = ResultRecorder::new(repository.clone());

        Self {
            game,
            presence,
            repository,
            recorder,
        }
    }

    /// Creates a session for a freshly-connected player and returns the
    /// live handle so tests can assert movement side effects.
    pub async fn join_connected(&self, name: &str) -> (PlayerSession, Arc<RecordingLivePlayer>) {
        let player_id = Uuid::new_v4();
        let live = Arc::new(RecordingLivePlayer::new());
        self.presence.connect(player_id, live.clone()).await;

        let session = PlayerSession::new(self.game.clone(), player_id, name);
        (session, live)
    }

    /// Creates a session for a player who is not currently connected.
    pub fn join_offline(&self, name: &str) -> PlayerSession {
        PlayerSession::new(self.game.clone(), Uuid::new_v4(), name)
    }
}

/// A small diving platform with a few distinct spawn points.
pub fn platform_points() -> Vec<SpawnPoint> {
    vec![
        SpawnPoint::new(0.5, 96.0, 0.5),
        SpawnPoint::new(2.5, 96.0, 0.5).facing(90.0, 0.0),
        SpawnPoint::new(4.5, 96.0, 0.5).facing(180.0, 0.0),
        SpawnPoint::new(6.5, 96.0, 0.5).facing(270.0, 0.0),
    ]
}
