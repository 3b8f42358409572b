// Public API
pub use recorder::ResultRecorder;
pub use role::PlayerRole;
pub use session::{PlayerSession, RecordState};
pub use stats::{StatsAccumulator, StatsSnapshot};

// Internal modules
mod recorder;
mod role;
mod session;
mod stats;
