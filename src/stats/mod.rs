mod errors;
pub mod models;
pub mod repository;

pub use errors::StatsError;
pub use models::PlayerGameRecord;
pub use repository::{InMemoryStatsRepository, PostgresStatsRepository, StatsRepository};
