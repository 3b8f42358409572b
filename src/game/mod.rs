// Public API
pub use context::GameContext;
pub use phase::GamePhase;

// Internal modules
mod context;
mod phase;
