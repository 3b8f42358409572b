use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, instrument};

use crate::stats::{PlayerGameRecord, StatsRepository};

use super::session::PlayerSession;

/// Turns a finished session into exactly one persisted record.
///
/// Safe to call at the wrong time or more than once: every skip
/// condition is a silent no-op, and the recorded latch only moves once
/// the store has accepted the row, so a failed write can be retried by
/// simply calling again.
pub struct ResultRecorder {
    repository: Arc<dyn StatsRepository>,
}

impl ResultRecorder {
    pub fn new(repository: Arc<dyn StatsRepository>) -> Self {
        Self { repository }
    }

    /// Records the session's final stats, if they are due.
    ///
    /// Skips silently when the game never left the lobby, when the
    /// player never jumped, or when the session is already recorded.
    /// Store errors are logged and swallowed; the latch stays open so a
    /// later call can retry.
    #[instrument(skip(self, session), fields(player_id = %session.player_id()))]
    pub async fn finalize_and_record(
        &self,
        session: &mut PlayerSession,
        more_than_one_played: bool,
        map_id: &str,
    ) {
        let phase = session.game().phase();
        if !phase.is_playable() {
            debug!(%phase, "Game never started, skipping stats");
            return;
        }

        if !session.did_play() {
            debug!("Player never jumped, skipping stats");
            return;
        }

        if session.is_recorded() {
            debug!("Stats already recorded, skipping");
            return;
        }

        let end_time = match session.stats().end_time() {
            Some(end) => end,
            None => {
                let now = Utc::now();
                session.stats_mut().set_end_time(now);
                now
            }
        };

        let snapshot = session.stats().snapshot(end_time);
        let record = PlayerGameRecord {
            game_id: session.game().game_id(),
            player_id: session.player_id(),
            player_name: session.name().to_string(),
            start_time: snapshot.start_time,
            end_time: snapshot.end_time,
            rounds_played: snapshot.rounds_played as i32,
            splats: snapshot.splats as i32,
            splashes: snapshot.splashes as i32,
            chickens: snapshot.chickens as i32,
            superior_win: snapshot.superior,
            total_points: snapshot.total_points,
            one_pointers: snapshot.one_pointers as i32,
            two_pointers: snapshot.two_pointers as i32,
            three_pointers: snapshot.three_pointers as i32,
            four_pointers: snapshot.four_pointers as i32,
            five_pointers: snapshot.five_pointers as i32,
            golden_rings: snapshot.golden_rings as i32,
            winner: snapshot.winner,
            single_player: !more_than_one_played,
            map_id: map_id.to_string(),
        };

        match self.repository.insert_record(&record).await {
            Ok(()) => {
                session.mark_recorded();
                info!(player_name = %record.player_name, "Stored player stats");
            }
            Err(err) => {
                error!(error = %err, "Failed to store player stats");
            }
        }
    }

    /// Pushes the player's current display name onto any records already
    /// stored for them. Best effort: failures are logged and dropped,
    /// never retried automatically.
    #[instrument(skip(self, session), fields(player_id = %session.player_id()))]
    pub async fn sync_display_name(&self, session: &PlayerSession) {
        match self
            .repository
            .update_player_name(session.player_id(), session.name())
            .await
        {
            Ok(rows) => debug!(rows, "Display name synced"),
            Err(err) => error!(error = %err, "Failed to sync display name"),
        }
    }
}
