use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::{models::PlayerGameRecord, StatsError};

/// Persistence sink for finished player sessions.
///
/// Both operations are fire-and-forget from the caller's perspective:
/// they report success or failure and return no payload beyond a row
/// count.
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Appends one finished session, keyed by (game, player).
    async fn insert_record(&self, record: &PlayerGameRecord) -> Result<(), StatsError>;

    /// Rewrites the display name on every record of a player. Returns
    /// the number of rows touched; zero rows just means the player has
    /// no records yet.
    async fn update_player_name(&self, player_id: Uuid, name: &str) -> Result<u64, StatsError>;
}

/// In-memory implementation of StatsRepository for development and
/// testing. Data is lost when the process exits.
pub struct InMemoryStatsRepository {
    records: Mutex<Vec<PlayerGameRecord>>,
}

impl Default for InMemoryStatsRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStatsRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    /// Returns a copy of every stored record.
    pub fn records(&self) -> Vec<PlayerGameRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Returns every stored record for one player.
    pub fn records_for_player(&self, player_id: Uuid) -> Vec<PlayerGameRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.player_id == player_id)
            .cloned()
            .collect()
    }

    /// Number of records currently stored.
    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl StatsRepository for InMemoryStatsRepository {
    #[instrument(skip(self, record))]
    async fn insert_record(&self, record: &PlayerGameRecord) -> Result<(), StatsError> {
        debug!(
            game_id = %record.game_id,
            player_id = %record.player_id,
            "Storing player record in memory"
        );

        let mut records = self.records.lock().unwrap();
        if records
            .iter()
            .any(|r| r.game_id == record.game_id && r.player_id == record.player_id)
        {
            warn!(
                game_id = %record.game_id,
                player_id = %record.player_id,
                "Record already exists in memory"
            );
            return Err(StatsError::Database("Record already exists".to_string()));
        }
        records.push(record.clone());

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_player_name(&self, player_id: Uuid, name: &str) -> Result<u64, StatsError> {
        let mut records = self.records.lock().unwrap();
        let mut updated = 0u64;
        for record in records.iter_mut().filter(|r| r.player_id == player_id) {
            record.player_name = name.to_string();
            updated += 1;
        }

        debug!(player_id = %player_id, updated, "Player name updated in memory");
        Ok(updated)
    }
}

/// PostgreSQL implementation of the stats repository.
pub struct PostgresStatsRepository {
    pool: PgPool,
}

impl PostgresStatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for PostgresStatsRepository {
    #[instrument(skip(self, record))]
    async fn insert_record(&self, record: &PlayerGameRecord) -> Result<(), StatsError> {
        debug!(
            game_id = %record.game_id,
            player_id = %record.player_id,
            "Storing player record in database"
        );

        sqlx::query(
            "INSERT INTO highdive_player_stats (\
             game_id, player_id, player_name, start_time, end_time, \
             rounds_played, splats, splashes, chickens, superior_win, \
             total_points, one_pointers, two_pointers, three_pointers, \
             four_pointers, five_pointers, golden_rings, winner, \
             single_player, map_id\
             ) VALUES (\
             $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, \
             $11, $12, $13, $14, $15, $16, $17, $18, $19, $20\
             )",
        )
        .bind(record.game_id)
        .bind(record.player_id)
        .bind(&record.player_name)
        .bind(record.start_time)
        .bind(record.end_time)
        .bind(record.rounds_played)
        .bind(record.splats)
        .bind(record.splashes)
        .bind(record.chickens)
        .bind(record.superior_win)
        .bind(record.total_points)
        .bind(record.one_pointers)
        .bind(record.two_pointers)
        .bind(record.three_pointers)
        .bind(record.four_pointers)
        .bind(record.five_pointers)
        .bind(record.golden_rings)
        .bind(record.winner)
        .bind(record.single_player)
        .bind(&record.map_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to store player record in database");
            StatsError::Database(e.to_string())
        })?;

        debug!(
            game_id = %record.game_id,
            player_id = %record.player_id,
            "Player record stored in database"
        );
        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_player_name(&self, player_id: Uuid, name: &str) -> Result<u64, StatsError> {
        let result =
            sqlx::query("UPDATE highdive_player_stats SET player_name = $2 WHERE player_id = $1")
                .bind(player_id)
                .bind(name)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    warn!(error = %e, player_id = %player_id, "Failed to update player name");
                    StatsError::Database(e.to_string())
                })?;

        let rows_affected = result.rows_affected();
        debug!(player_id = %player_id, rows_affected, "Player name updated in database");
        Ok(rows_affected)
    }
}
