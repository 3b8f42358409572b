use chrono::{DateTime, Utc};

/// In-memory counters for one player across one game session.
///
/// Every recording call is a plain increment: no return value, no
/// failure mode, no locking. All mutation arrives on the game loop's
/// single thread of control, and counters only ever grow until the
/// session is finalized.
#[derive(Debug, Clone, Default)]
pub struct StatsAccumulator {
    rounds_played: u32,
    splats: u32,
    splashes: u32,
    chickens: u32,
    golden_rings: u32,
    one_pointers: u32,
    two_pointers: u32,
    three_pointers: u32,
    four_pointers: u32,
    five_pointers: u32,
    total_points: i32,
    chicken_streak: u32,
    winner: bool,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A finished round the player took part in.
    pub fn record_round(&mut self) {
        self.rounds_played += 1;
    }

    /// A jump that missed the water. Ends any chicken streak.
    pub fn record_splat(&mut self) {
        self.splats += 1;
        self.chicken_streak = 0;
    }

    /// A clean landing in the water. Ends any chicken streak.
    pub fn record_splash(&mut self) {
        self.splashes += 1;
        self.chicken_streak = 0;
    }

    /// The player backed out of their jump.
    pub fn record_chicken(&mut self) {
        self.chickens += 1;
        self.chicken_streak += 1;
    }

    pub fn record_golden_ring(&mut self) {
        self.golden_rings += 1;
    }

    /// Folds one scoring event into the totals.
    ///
    /// Values 1 through 4 land in their own tier counter; anything else
    /// counts as a five-pointer. Callers only ever pass 1 through 5, but
    /// out-of-range values are bucketed rather than rejected.
    pub fn record_points(&mut self, value: i32) {
        match value {
            1 => self.one_pointers += 1,
            2 => self.two_pointers += 1,
            3 => self.three_pointers += 1,
            4 => self.four_pointers += 1,
            _ => self.five_pointers += 1,
        }

        self.total_points += value;
    }

    /// Marks the player as the game's winner. One-way, never cleared.
    pub fn set_winner(&mut self) {
        self.winner = true;
    }

    /// Set by the controlling game when the session starts counting.
    pub fn set_start_time(&mut self, start: DateTime<Utc>) {
        self.start_time = Some(start);
    }

    /// Set by the controlling game; defaulted at finalize if never set.
    pub fn set_end_time(&mut self, end: DateTime<Utc>) {
        self.end_time = Some(end);
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn splats(&self) -> u32 {
        self.splats
    }

    pub fn splashes(&self) -> u32 {
        self.splashes
    }

    pub fn chickens(&self) -> u32 {
        self.chickens
    }

    pub fn golden_rings(&self) -> u32 {
        self.golden_rings
    }

    pub fn total_points(&self) -> i32 {
        self.total_points
    }

    /// Consecutive chickens since the last splat or splash.
    pub fn chicken_streak(&self) -> u32 {
        self.chicken_streak
    }

    pub fn winner(&self) -> bool {
        self.winner
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    /// Freezes the counters for persistence.
    ///
    /// `superior` is decided here: the session ends without a single
    /// splat. If the controlling game never set a start time, the end
    /// time stands in for it.
    pub fn snapshot(&self, end_time: DateTime<Utc>) -> StatsSnapshot {
        StatsSnapshot {
            start_time: self.start_time.unwrap_or(end_time),
            end_time,
            rounds_played: self.rounds_played,
            splats: self.splats,
            splashes: self.splashes,
            chickens: self.chickens,
            golden_rings: self.golden_rings,
            one_pointers: self.one_pointers,
            two_pointers: self.two_pointers,
            three_pointers: self.three_pointers,
            four_pointers: self.four_pointers,
            five_pointers: self.five_pointers,
            total_points: self.total_points,
            superior: self.splats == 0,
            winner: self.winner,
        }
    }
}

/// Frozen view of an accumulator, taken at finalize time.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSnapshot {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub rounds_played: u32,
    pub splats: u32,
    pub splashes: u32,
    pub chickens: u32,
    pub golden_rings: u32,
    pub one_pointers: u32,
    pub two_pointers: u32,
    pub three_pointers: u32,
    pub four_pointers: u32,
    pub five_pointers: u32,
    pub total_points: i32,
    pub superior: bool,
    pub winner: bool,
}
