// Library crate for the highdive minigame's player-session core.
// The surrounding game loop, client networking and map loading live in
// the embedding server; this crate owns per-player session state, role
// handling and end-of-game stats persistence.

pub mod game;
pub mod map;
pub mod player;
pub mod presence;
pub mod stats;

// Re-export commonly used types for easier access in embedders and tests
pub use game::{GameContext, GamePhase};
pub use map::{ShuffledSpawnAllocator, SpawnAllocator, SpawnPoint};
pub use player::{PlayerRole, PlayerSession, RecordState, ResultRecorder, StatsAccumulator};
pub use presence::{
    InMemoryPresence, LivePlayer, MovementMode, MovementProfile, PlayerPresence,
    RecordingLivePlayer,
};
pub use stats::{
    InMemoryStatsRepository, PlayerGameRecord, PostgresStatsRepository, StatsRepository,
};
