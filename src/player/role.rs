use std::fmt;

/// Role of a participant within one game.
///
/// `Unassigned` covers the window between joining and the first role
/// assignment; a player in it is neither jumper nor spectator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerRole {
    #[default]
    Unassigned,
    /// Active participant in the round.
    Jumper,
    /// Non-scoring observer.
    Spectator,
}

impl fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PlayerRole::Unassigned => "unassigned",
                PlayerRole::Jumper => "jumper",
                PlayerRole::Spectator => "spectator",
            }
        )
    }
}
