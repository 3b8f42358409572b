use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One finished player session, as persisted to the stats store.
///
/// Append-only, one row per (game, player). The field set is the full
/// contract with downstream highscore readers; field order carries no
/// meaning.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct PlayerGameRecord {
    pub game_id: Uuid,
    pub player_id: Uuid,
    pub player_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub rounds_played: i32,
    pub splats: i32,
    pub splashes: i32,
    pub chickens: i32,
    /// The player finished the whole session without a single splat.
    pub superior_win: bool,
    pub total_points: i32,
    pub one_pointers: i32,
    pub two_pointers: i32,
    pub three_pointers: i32,
    pub four_pointers: i32,
    pub five_pointers: i32,
    pub golden_rings: i32,
    pub winner: bool,
    /// Derived at record time: nobody else played this game.
    pub single_player: bool,
    pub map_id: String,
}
