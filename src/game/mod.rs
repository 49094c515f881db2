// Public API - what other modules can use
pub use models::{Game, NewPlayerScore, PlayerScore, ScoreBreakdown, ScoreCategory};
pub use repository::{GameError, GameRepository};

// Internal modules
pub mod handlers;
mod models;
mod repository;
pub mod types;
