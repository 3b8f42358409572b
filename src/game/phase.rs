use std::fmt;
use strum_macros::EnumIter;

/// Coarse phase of a game instance. The surrounding game loop owns the
/// transitions; this core only reads the current phase.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, EnumIter,
)]
pub enum GamePhase {
    Init,
    WaitForPlayers,
    Countdown,
    Running,
    Ended,
}

impl GamePhase {
    /// Whether a game in this phase actually took place for stats
    /// purposes. `Init` and `WaitForPlayers` mean nobody ever jumped.
    pub fn is_playable(self) -> bool {
        !matches!(self, GamePhase::Init | GamePhase::WaitForPlayers)
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                GamePhase::Init => "init",
                GamePhase::WaitForPlayers => "wait_for_players",
                GamePhase::Countdown => "countdown",
                GamePhase::Running => "running",
                GamePhase::Ended => "ended",
            }
        )
    }
}
