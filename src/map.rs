use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// A spawn position on the jumping platform, with facing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
}

impl SpawnPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn facing(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }
}

/// Map collaborator that hands out spawn points to sessions.
///
/// Callable repeatedly; implementations are expected to vary the points
/// they deal so players don't stack on the same spot.
pub trait SpawnAllocator: Send + Sync {
    fn deal_spawn_point(&self) -> SpawnPoint;
}

/// In-process allocator for development and testing.
///
/// Shuffles the configured points once at construction, then deals them
/// out round-robin.
pub struct ShuffledSpawnAllocator {
    points: Vec<SpawnPoint>,
    next: Mutex<usize>,
}

impl ShuffledSpawnAllocator {
    /// Creates an allocator over the map's configured spawn points.
    ///
    /// Panics if `points` is empty: a map without spawn points cannot
    /// host a game.
    pub fn new(mut points: Vec<SpawnPoint>) -> Self {
        assert!(!points.is_empty(), "map has no spawn points configured");
        points.shuffle(&mut rand::rng());
        Self {
            points,
            next: Mutex::new(0),
        }
    }
}

impl SpawnAllocator for ShuffledSpawnAllocator {
    fn deal_spawn_point(&self) -> SpawnPoint {
        let mut next = self.next.lock().unwrap();
        let point = self.points[*next % self.points.len()];
        *next += 1;
        point
    }
}
