use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::game::GameContext;
use crate::map::SpawnPoint;
use crate::presence::MovementProfile;

use super::role::PlayerRole;
use super::stats::StatsAccumulator;

/// Whether this session's stats have reached the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordState {
    #[default]
    Unrecorded,
    /// Terminal: the session is immutable for stats purposes.
    Recorded,
}

/// One player's session within one game instance.
///
/// Created when the player is first associated with the game, mutated by
/// game-loop events throughout the round, destroyed together with the
/// game. All mutation comes from the game loop's single thread of
/// control, so there is no internal locking.
pub struct PlayerSession {
    game: Arc<GameContext>,
    player_id: Uuid,
    name: String,
    role: PlayerRole,
    ready: bool,
    disconnected_ticks: u64,
    spawn_point: Option<SpawnPoint>,
    did_play: bool,
    joined_as_spectator: bool,
    joined_before: bool,
    record_state: RecordState,
    stats: StatsAccumulator,
}

impl PlayerSession {
    pub fn new(game: Arc<GameContext>, player_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            game,
            player_id,
            name: name.into(),
            role: PlayerRole::Unassigned,
            ready: false,
            disconnected_ticks: 0,
            spawn_point: None,
            did_play: false,
            joined_as_spectator: false,
            joined_before: false,
            record_state: RecordState::Unrecorded,
            stats: StatsAccumulator::new(),
        }
    }

    pub fn game(&self) -> &Arc<GameContext> {
        &self.game
    }

    pub fn player_id(&self) -> Uuid {
        self.player_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display names follow the account; last write wins.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn role(&self) -> PlayerRole {
        self.role
    }

    pub fn is_jumper(&self) -> bool {
        self.role == PlayerRole::Jumper
    }

    pub fn is_spectator(&self) -> bool {
        self.role == PlayerRole::Spectator
    }

    /// Makes the player an active jumper.
    ///
    /// Latches `did_play`: once a jumper, the session counts as having
    /// competed even if it is switched to spectator later. The movement
    /// profile only reaches the player while they are connected; a
    /// missing live handle skips the side effects without error.
    pub async fn assign_jumper(&mut self) {
        self.role = PlayerRole::Jumper;
        self.did_play = true;
        self.apply_profile(MovementProfile::jumper()).await;
    }

    /// Parks the player as a non-scoring observer.
    pub async fn assign_spectator(&mut self) {
        self.role = PlayerRole::Spectator;
        self.apply_profile(MovementProfile::spectator()).await;
    }

    async fn apply_profile(&self, profile: MovementProfile) {
        match self.game.presence().lookup(self.player_id).await {
            Some(live) => live.apply_movement(profile),
            None => {
                debug!(
                    player_id = %self.player_id,
                    role = %self.role,
                    "Player offline, movement profile skipped"
                );
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Readiness toggle, consumed by the lobby logic upstream.
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn disconnected_ticks(&self) -> u64 {
        self.disconnected_ticks
    }

    /// Driven by the connection tracker upstream: incremented per tick
    /// while offline, reset to zero on reconnect. Interpreting the value
    /// is the caller's business.
    pub fn set_disconnected_ticks(&mut self, ticks: u64) {
        self.disconnected_ticks = ticks;
    }

    /// Spawn point for this session, dealt by the map on first use and
    /// cached for the session's lifetime. At most one allocation happens
    /// no matter how often this is called.
    pub fn spawn_point(&mut self) -> SpawnPoint {
        if let Some(point) = self.spawn_point {
            return point;
        }

        let point = self.game.map().deal_spawn_point();
        self.spawn_point = Some(point);
        point
    }

    /// Whether the player was ever a jumper in this game. This, not the
    /// current role, decides if the session counts for stats.
    pub fn did_play(&self) -> bool {
        self.did_play
    }

    pub fn joined_as_spectator(&self) -> bool {
        self.joined_as_spectator
    }

    pub fn set_joined_as_spectator(&mut self, joined_as_spectator: bool) {
        self.joined_as_spectator = joined_as_spectator;
    }

    /// Whether the player was in this game before; lets the loop tell a
    /// rejoin apart from a first join.
    pub fn joined_before(&self) -> bool {
        self.joined_before
    }

    pub fn set_joined_before(&mut self, joined_before: bool) {
        self.joined_before = joined_before;
    }

    pub fn record_state(&self) -> RecordState {
        self.record_state
    }

    pub fn is_recorded(&self) -> bool {
        self.record_state == RecordState::Recorded
    }

    pub(crate) fn mark_recorded(&mut self) {
        self.record_state = RecordState::Recorded;
    }

    pub fn stats(&self) -> &StatsAccumulator {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut StatsAccumulator {
        &mut self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{ShuffledSpawnAllocator, SpawnAllocator};
    use crate::presence::{InMemoryPresence, MovementMode, RecordingLivePlayer};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingAllocator {
        dealt: AtomicUsize,
    }

    impl CountingAllocator {
        fn new() -> Self {
            Self {
                dealt: AtomicUsize::new(0),
            }
        }
    }

    impl SpawnAllocator for CountingAllocator {
        fn deal_spawn_point(&self) -> SpawnPoint {
            let n = self.dealt.fetch_add(1, Ordering::SeqCst);
            SpawnPoint::new(n as f64, 64.0, 0.0)
        }
    }

    fn context_with(
        map: Arc<dyn SpawnAllocator>,
        presence: Arc<InMemoryPresence>,
    ) -> Arc<GameContext> {
        Arc::new(GameContext::new(map, presence))
    }

    fn simple_context(presence: Arc<InMemoryPresence>) -> Arc<GameContext> {
        context_with(
            Arc::new(ShuffledSpawnAllocator::new(vec![SpawnPoint::new(
                0.0, 64.0, 0.0,
            )])),
            presence,
        )
    }

    #[tokio::test]
    async fn starts_unassigned_not_ready_unrecorded() {
        let session = PlayerSession::new(
            simple_context(Arc::new(InMemoryPresence::new())),
            Uuid::new_v4(),
            "mika",
        );

        assert_eq!(session.role(), PlayerRole::Unassigned);
        assert!(!session.is_jumper());
        assert!(!session.is_spectator());
        assert!(!session.is_ready());
        assert!(!session.did_play());
        assert!(!session.joined_as_spectator());
        assert!(!session.joined_before());
        assert_eq!(session.record_state(), RecordState::Unrecorded);
    }

    #[tokio::test]
    async fn assign_jumper_applies_profile_and_latches_did_play() {
        let presence = Arc::new(InMemoryPresence::new());
        let player_id = Uuid::new_v4();
        let live = Arc::new(RecordingLivePlayer::new());
        presence.connect(player_id, live.clone()).await;

        let mut session = PlayerSession::new(simple_context(presence), player_id, "mika");
        session.assign_jumper().await;

        assert!(session.is_jumper());
        assert!(session.did_play());

        let profile = live.last_applied().expect("profile should be applied");
        assert_eq!(profile.mode, MovementMode::Standard);
        assert!(!profile.flight_allowed);
    }

    #[tokio::test]
    async fn assign_spectator_applies_observer_profile() {
        let presence = Arc::new(InMemoryPresence::new());
        let player_id = Uuid::new_v4();
        let live = Arc::new(RecordingLivePlayer::new());
        presence.connect(player_id, live.clone()).await;

        let mut session = PlayerSession::new(simple_context(presence), player_id, "mika");
        session.assign_spectator().await;

        assert!(session.is_spectator());
        assert!(!session.did_play());

        let profile = live.last_applied().expect("profile should be applied");
        assert_eq!(profile.mode, MovementMode::FreeCam);
        assert!(profile.flight_allowed);
    }

    #[tokio::test]
    async fn did_play_survives_switch_to_spectator() {
        let presence = Arc::new(InMemoryPresence::new());
        let mut session = PlayerSession::new(simple_context(presence), Uuid::new_v4(), "mika");

        session.assign_jumper().await;
        session.assign_spectator().await;

        assert!(session.is_spectator());
        assert!(!session.is_jumper());
        assert!(session.did_play());
    }

    #[tokio::test]
    async fn offline_assignment_updates_role_without_side_effects() {
        let presence = Arc::new(InMemoryPresence::new());
        let player_id = Uuid::new_v4();
        // Not connected: no live handle registered.
        let mut session = PlayerSession::new(simple_context(presence.clone()), player_id, "mika");

        session.assign_jumper().await;
        assert!(session.is_jumper());
        assert!(session.did_play());

        // Reconnect and reassign: the full profile is applied fresh.
        let live = Arc::new(RecordingLivePlayer::new());
        presence.connect(player_id, live.clone()).await;
        session.assign_jumper().await;
        assert_eq!(live.applied_count(), 1);
    }

    #[tokio::test]
    async fn every_assignment_reapplies_the_full_profile() {
        let presence = Arc::new(InMemoryPresence::new());
        let player_id = Uuid::new_v4();
        let live = Arc::new(RecordingLivePlayer::new());
        presence.connect(player_id, live.clone()).await;

        let mut session = PlayerSession::new(simple_context(presence), player_id, "mika");
        session.assign_jumper().await;
        session.assign_jumper().await;
        session.assign_spectator().await;

        assert_eq!(live.applied_count(), 3);
    }

    #[tokio::test]
    async fn spawn_point_is_allocated_once_and_cached() {
        let allocator = Arc::new(CountingAllocator::new());
        let context = context_with(allocator.clone(), Arc::new(InMemoryPresence::new()));
        let mut session = PlayerSession::new(context, Uuid::new_v4(), "mika");

        let first = session.spawn_point();
        for _ in 0..4 {
            assert_eq!(session.spawn_point(), first);
        }

        assert_eq!(allocator.dealt.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn sessions_do_not_share_spawn_points() {
        let allocator = Arc::new(CountingAllocator::new());
        let context = context_with(allocator.clone(), Arc::new(InMemoryPresence::new()));

        let mut first = PlayerSession::new(context.clone(), Uuid::new_v4(), "mika");
        let mut second = PlayerSession::new(context, Uuid::new_v4(), "jonas");

        assert_ne!(first.spawn_point(), second.spawn_point());
        assert_eq!(allocator.dealt.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn disconnect_ticks_follow_the_external_counter() {
        let mut session = PlayerSession::new(
            simple_context(Arc::new(InMemoryPresence::new())),
            Uuid::new_v4(),
            "mika",
        );

        session.set_disconnected_ticks(40);
        assert_eq!(session.disconnected_ticks(), 40);

        // Reconnect: the tracker resets the counter.
        session.set_disconnected_ticks(0);
        assert_eq!(session.disconnected_ticks(), 0);
    }

    #[tokio::test]
    async fn display_name_is_last_write_wins() {
        let mut session = PlayerSession::new(
            simple_context(Arc::new(InMemoryPresence::new())),
            Uuid::new_v4(),
            "mika",
        );

        session.set_name("mika_v2");
        session.set_name("mika_v3");
        assert_eq!(session.name(), "mika_v3");
    }
}
